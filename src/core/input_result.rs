//! Unified enum describing what should happen after a screen handles a key.
//!
//! Screen handlers only touch their own state; anything that crosses screens
//! or leaves the core (navigation, account requests, quitting) is returned
//! as an `InputResult` and applied in one place.

use super::Screen;
use crate::auth::AuthRequest;

#[derive(Debug, Clone)]
pub enum InputResult {
    /// Handled, nothing further to do
    Continue,

    /// The screen did not use the key
    Ignored,

    /// Switch to another screen
    Navigate(Screen),

    /// Go to the current screen's parent
    Back,

    /// A dot command typed into the answer box, without the leading dot
    Command(String),

    /// Forward to the account worker
    Auth(AuthRequest),

    Quit,
}

impl InputResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, InputResult::Ignored)
    }

    /// Whether applying this result leaves the current screen
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            InputResult::Navigate(_) | InputResult::Back | InputResult::Quit
        )
    }
}
