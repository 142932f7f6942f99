//! TUI Frontend (ratatui-based)
//!
//! Implements the Frontend trait using ratatui for terminal rendering, with
//! crossterm for event handling and terminal management. Each screen has its
//! own render module; `app` lays them out between the header and footer.

pub mod app;
pub mod countdown;
pub mod login;
pub mod menu;
pub mod profile_view;
pub mod puzzle_view;

pub use app::TuiFrontend;
