//! Countdown bar for the puzzle screen.
//!
//! Displays the remaining seconds plus a row of block glyphs that shrinks as
//! time runs out, switching color once the low-time threshold is reached.

use crate::theme::AppTheme;
use crate::widgets::CountdownState;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

pub struct CountdownBar<'a> {
    countdown: &'a CountdownState,
    icon: char, // Character to use for countdown blocks
    low_warning: u32,
}

/// Cells of a `width`-cell bar to fill for `fraction` of the time left
///
/// Any time left shows at least one block.
pub fn filled_cells(fraction: f64, width: u16) -> u16 {
    if fraction <= 0.0 || width == 0 {
        return 0;
    }
    let cells = (fraction.min(1.0) * f64::from(width) - 1e-9).ceil() as u16;
    cells.clamp(1, width)
}

impl<'a> CountdownBar<'a> {
    pub fn new(countdown: &'a CountdownState, icon: &str, low_warning: u32) -> Self {
        Self {
            countdown,
            icon: icon.chars().next().unwrap_or('█'),
            low_warning,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        if area.width < 6 || area.height < 1 {
            return;
        }

        let remaining = self.countdown.remaining_seconds();
        let color = if remaining <= self.low_warning {
            theme.timer_low
        } else {
            theme.timer
        };
        let style = Style::default().fg(color);

        // Right-align the number so the bar doesn't shift from 100 -> 99
        // Format: "  9s ████" or "120s ████████████"
        let label = if self.countdown.is_active() || self.countdown.is_expired() {
            format!("{:>3}s ", remaining)
        } else {
            "  --  ".to_string()
        };
        let label_width = label.chars().count() as u16;
        buf.set_string(area.x, area.y, &label, style);

        if !self.countdown.is_active() {
            return;
        }

        let bar_width = area.width.saturating_sub(label_width);
        let filled = filled_cells(self.countdown.fraction_remaining(), bar_width);
        for i in 0..filled {
            let x = area.x + label_width + i;
            buf[(x, area.y)].set_char(self.icon).set_fg(color);
        }
    }
}
