//! UI module for the trivia TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;
