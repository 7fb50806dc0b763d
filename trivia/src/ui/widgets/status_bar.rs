//! Status bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use trivia_core::BoardStatus;

use crate::app::InputMode;
use crate::ui::theme::GameTheme;

/// Status bar showing score, board state and the latest message
pub struct StatusBarWidget<'a> {
    score: u32,
    loaded: usize,
    target: usize,
    board_status: BoardStatus,
    input_mode: InputMode,
    theme: &'a GameTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(score: u32, input_mode: InputMode, theme: &'a GameTheme) -> Self {
        Self {
            score,
            loaded: 0,
            target: 0,
            board_status: BoardStatus::Loading,
            input_mode,
            theme,
            message: None,
        }
    }

    pub fn progress(mut self, loaded: usize, target: usize, status: BoardStatus) -> Self {
        self.loaded = loaded;
        self.target = target;
        self.board_status = status;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode_text, mode_style) = match self.input_mode {
            InputMode::Board => ("BOARD", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            InputMode::Answer => ("ANSWER", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        };

        let board_text = match self.board_status {
            BoardStatus::Loading => format!("Loading {}/{}", self.loaded, self.target),
            BoardStatus::Ready => format!("{} categories", self.loaded),
            BoardStatus::Failed => format!("Load failed ({}/{})", self.loaded, self.target),
        };
        let board_style = match self.board_status {
            BoardStatus::Failed => self.theme.error_style(),
            _ => self.theme.system_style(),
        };

        let mut spans = vec![
            Span::styled(format!("-- {mode_text} --"), mode_style),
            Span::raw(" | "),
            Span::styled(
                format!("Score: ${}", self.score),
                Style::default()
                    .fg(self.theme.clue_value)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(board_text, board_style),
        ];

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(msg, Style::default().add_modifier(Modifier::DIM)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget<'a> {
    input_mode: InputMode,
    theme: &'a GameTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(input_mode: InputMode, theme: &'a GameTheme) -> Self {
        Self { input_mode, theme }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys: &[&str] = match self.input_mode {
            InputMode::Board => &["←↓↑→/hjkl:move", "Enter:open", "?:help", "q:quit"],
            InputMode::Answer => &["Enter:submit", "Esc:close", "Ctrl+c:quit"],
        };

        let mut spans = Vec::new();
        for (i, key) in hotkeys.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, self.theme.system_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
