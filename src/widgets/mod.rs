//! Widget state structs (rendering-agnostic)
//!
//! This module contains state-only structures for all widget types.
//! These structs hold data and provide methods for state manipulation,
//! but contain no rendering logic. The TUI frontend renders these states
//! with ratatui.

pub mod countdown;
pub mod login_form;
pub mod menu;
pub mod session;
pub mod traits;

pub use countdown::CountdownState;
pub use login_form::{LoginForm, LoginMode};
pub use menu::MenuState;
pub use session::{Outcome, PuzzleSession, SubmitResult};
pub use traits::{FieldNavigable, Navigable, TextEditable};
