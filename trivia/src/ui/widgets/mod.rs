//! TUI widgets for the trivia game

pub mod board;
pub mod input;
pub mod status_bar;

pub use board::BoardWidget;
pub use input::InputWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
