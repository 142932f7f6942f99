//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It keeps event polling, rendering and cleanup behind one interface so the
//! event loop in `main.rs` only talks to the core and this trait.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events converted to the frontend-agnostic
    /// `FrontendEvent` enum (empty if nothing arrived within the poll timeout).
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Called once per loop iteration. Mutable because an expired toast is
    /// dropped before drawing.
    fn render(&mut self, core: &mut AppCore) -> Result<()>;

    /// Restore the terminal before the application exits
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size in cells
    fn size(&self) -> (u16, u16);
}
