//! Color theme and styling for the trivia TUI

use ratatui::style::{Color, Modifier, Style};

/// Game UI color theme
#[derive(Debug, Clone)]
pub struct GameTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Board colors
    pub board_background: Color,
    pub category_title: Color,
    pub clue_value: Color,
    pub clue_used: Color,
    pub selection: Color,

    // Result colors
    pub success: Color,
    pub failure: Color,
    pub error_text: Color,

    // Text colors
    pub player_text: Color,
    pub system_text: Color,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            board_background: Color::Blue,
            category_title: Color::White,
            clue_value: Color::Yellow,
            clue_used: Color::DarkGray,
            selection: Color::LightCyan,

            success: Color::Green,
            failure: Color::Red,
            error_text: Color::LightRed,

            player_text: Color::Cyan,
            system_text: Color::DarkGray,
        }
    }
}

impl GameTheme {
    /// Get style for a category header
    pub fn category_style(&self) -> Style {
        Style::default()
            .fg(self.category_title)
            .bg(self.board_background)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a clue cell
    pub fn cell_style(&self, used: bool, selected: bool) -> Style {
        let base = if used {
            Style::default()
                .fg(self.clue_used)
                .bg(self.board_background)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default()
                .fg(self.clue_value)
                .bg(self.board_background)
                .add_modifier(Modifier::BOLD)
        };

        if selected {
            base.fg(self.board_background).bg(self.selection)
        } else {
            base
        }
    }

    /// Get style for the player's typed answer
    pub fn player_style(&self) -> Style {
        Style::default()
            .fg(self.player_text)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get style for a revealed result
    pub fn result_style(&self, correct: bool) -> Style {
        Style::default()
            .fg(if correct { self.success } else { self.failure })
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a rejected answer
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_text)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
