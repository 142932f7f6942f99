//! Behavior traits for menu widgets
//!
//! These traits define common behaviors that widgets can implement,
//! so key handling in the core can treat every list or form the same way.

/// Trait for widgets that support list navigation
pub trait Navigable {
    /// Move selection up one item
    fn navigate_up(&mut self);

    /// Move selection down one item
    fn navigate_down(&mut self);

    /// Move to first item (optional - not all widgets support this)
    fn home(&mut self) {}

    /// Move to last item (optional - not all widgets support this)
    fn end(&mut self) {}
}

/// Trait for widgets that support field navigation (forms)
pub trait FieldNavigable {
    /// Move to next field (Tab)
    fn next_field(&mut self);

    /// Move to previous field (Shift+Tab)
    fn previous_field(&mut self);

    /// Get the number of fields
    fn field_count(&self) -> usize;

    /// Get the current field index
    fn current_field(&self) -> usize;
}

/// Trait for widgets with a single editable text target
pub trait TextEditable {
    /// Get mutable reference to the currently focused text
    fn focused_text_mut(&mut self) -> Option<&mut String>;

    fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    fn pop_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    fn paste(&mut self, pasted: &str) {
        if let Some(text) = self.focused_text_mut() {
            text.extend(pasted.chars().filter(|c| !c.is_control()));
        }
    }
}
