//! Event handling for the trivia TUI

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.show_help {
        return handle_help_key(app, key);
    }

    match app.input_mode {
        InputMode::Board => handle_board_mode(app, key),
        InputMode::Answer => handle_answer_mode(app, key),
    }
}

/// Any key closes the help overlay; q still quits
fn handle_help_key(app: &mut App, key: KeyEvent) -> EventResult {
    if key.code == KeyCode::Char('q') {
        return EventResult::Quit;
    }
    app.toggle_help();
    EventResult::NeedsRedraw
}

/// Handle keys while moving around the board
fn handle_board_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }

        // Navigation
        KeyCode::Char('h') | KeyCode::Left => {
            app.move_selection(-1, 0);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.move_selection(1, 0);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(0, -1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(0, 1);
            EventResult::NeedsRedraw
        }

        KeyCode::Enter | KeyCode::Char(' ') => {
            app.open_selected();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle keys while the clue dialog is open
fn handle_answer_mode(app: &mut App, key: KeyEvent) -> EventResult {
    // While the result is showing only closing the dialog makes sense
    if app.session.presenter().is_revealing() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.close_clue();
                EventResult::NeedsRedraw
            }
            _ => EventResult::Continue,
        };
    }

    match key.code {
        KeyCode::Esc => {
            app.close_clue();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.submit_answer(Instant::now());
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
