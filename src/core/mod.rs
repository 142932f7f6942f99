//! Core application layer
//!
//! Screens, key handling, dot commands and toasts. Core updates the widget
//! state structs; frontends read and render them.
//! NO imports from frontend/ or rendering code.

pub mod app_core;
pub mod input_result;
pub mod routes;

pub use app_core::{AppCore, HomeEntry, ToastKind};
pub use input_result::InputResult;
pub use routes::Screen;
