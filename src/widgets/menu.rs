use super::traits::Navigable;

/// Selectable list state (rendering-agnostic)
///
/// Used for the puzzle catalogue and the home screen. Holds the entries and
/// the highlighted index; rendering reads both.
#[derive(Debug, Clone)]
pub struct MenuState<T> {
    pub items: Vec<T>,
    pub selected: usize,
}

impl<T> MenuState<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Highlight the first entry matching `pred`, leaving the selection alone otherwise
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) {
        if let Some(i) = self.items.iter().position(pred) {
            self.selected = i;
        }
    }
}

impl<T> Navigable for MenuState<T> {
    fn navigate_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.items.len() - 1
        } else {
            self.selected - 1
        };
    }

    fn navigate_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    fn home(&mut self) {
        self.selected = 0;
    }

    fn end(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }
}
