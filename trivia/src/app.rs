//! Main application state and logic

use std::time::Instant;

use tokio::sync::mpsc;
use trivia_core::{BoardStatus, FetchEvent, GameSession, SessionError};

use crate::ui::theme::GameTheme;
use crate::view::BoardView;

/// Which part of the screen takes keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Moving around the board (default)
    #[default]
    Board,
    /// Typing an answer into the clue dialog
    Answer,
}

/// Main application state
pub struct App {
    pub session: GameSession<BoardView>,
    fetch_rx: Option<mpsc::Receiver<FetchEvent>>,

    // UI state
    pub theme: GameTheme,
    pub show_help: bool,
    selected: (usize, usize),

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Create an application around a session and the fetch worker feeding it
    pub fn new(session: GameSession<BoardView>, fetch_rx: mpsc::Receiver<FetchEvent>) -> Self {
        let mut app = Self {
            session,
            fetch_rx: Some(fetch_rx),
            theme: GameTheme::default(),
            show_help: false,
            selected: (0, 0),
            input_mode: InputMode::Board,
            input_buffer: String::new(),
            cursor_position: 0,
            status_message: None,
            should_quit: false,
        };
        app.session.start();
        app.set_status("Loading categories...");
        app
    }

    /// Apply any categories the fetch worker has produced
    pub fn poll_fetch(&mut self) {
        let Some(rx) = self.fetch_rx.as_mut() else {
            return;
        };

        loop {
            match rx.try_recv() {
                Ok(FetchEvent::Category(category)) => {
                    self.session.add_category(category);
                }
                Ok(FetchEvent::Finished { .. }) => {
                    self.session.finish_loading();
                    self.set_status_if_loading("Board ready. Pick a clue!");
                    self.fetch_rx = None;
                    return;
                }
                Ok(FetchEvent::Failed(e)) => {
                    self.session.fail_loading(&e);
                    self.set_status(format!("Could not load the full board: {e}"));
                    self.fetch_rx = None;
                    return;
                }
                Err(mpsc::error::TryRecvError::Empty) => return,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.fetch_rx = None;
                    return;
                }
            }
        }
    }

    /// Tick timers
    pub fn tick(&mut self, now: Instant) {
        if self.session.tick(now) {
            self.leave_answer_mode();
        }
    }

    // =========================================================================
    // Board navigation
    // =========================================================================

    /// Currently highlighted (column, row)
    pub fn selected(&self) -> (usize, usize) {
        self.selected
    }

    /// Move the board cursor, clamped to the loaded board
    pub fn move_selection(&mut self, dx: isize, dy: isize) {
        let view = self.session.presenter();
        if view.columns.is_empty() {
            return;
        }

        let max_col = view.columns.len() - 1;
        let col = self.selected.0.saturating_add_signed(dx).min(max_col);
        let rows = view.columns[col].cells.len();
        let row = if rows == 0 {
            0
        } else {
            self.selected.1.saturating_add_signed(dy).min(rows - 1)
        };
        self.selected = (col, row);
    }

    /// Open the highlighted clue
    pub fn open_selected(&mut self) {
        let (column, row) = self.selected;
        match self.session.open_clue_at(column, row) {
            Ok(_) => {
                self.clear_input();
                self.input_mode = InputMode::Answer;
                self.clear_status();
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Submit the typed answer for the open clue
    pub fn submit_answer(&mut self, now: Instant) {
        let input = self.input_buffer.clone();
        match self.session.submit_answer(&input, now) {
            Ok(judgement) => {
                self.clear_input();
                if judgement.correct {
                    self.set_status(format!("Correct! +{}", judgement.awarded));
                } else {
                    self.set_status("Incorrect.");
                }
            }
            // Shown inside the dialog; keep the text so it can be fixed
            Err(SessionError::Answer(_)) => {}
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Close the clue dialog
    pub fn close_clue(&mut self) {
        self.session.close_clue();
        self.leave_answer_mode();
    }

    fn leave_answer_mode(&mut self) {
        self.input_mode = InputMode::Board;
        self.clear_input();
    }

    /// Whether the board is still filling
    pub fn is_loading(&self) -> bool {
        self.session.status() == BoardStatus::Loading
    }

    // =========================================================================
    // Answer input
    // =========================================================================

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Clear the input buffer
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    // =========================================================================
    // Status
    // =========================================================================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Replace the loading notice, but leave any other message alone
    fn set_status_if_loading(&mut self, message: impl Into<String>) {
        let loading = self
            .status_message
            .as_deref()
            .map_or(true, |m| m.starts_with("Loading"));
        if loading {
            self.status_message = Some(message.into());
        }
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
