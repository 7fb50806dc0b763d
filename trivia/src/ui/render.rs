//! Render orchestration for the trivia TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{BoardWidget, HotkeyBarWidget, InputWidget, StatusBarWidget};
use crate::view::ModalView;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, layout.title_area);

    let view = app.session.presenter();
    let selected = (app.input_mode == InputMode::Board).then(|| app.selected());
    let board = BoardWidget::new(view, app.session.store(), &app.theme)
        .selected(selected)
        .loading(app.is_loading());
    frame.render_widget(board, layout.board_area);

    let status = StatusBarWidget::new(view.score, app.input_mode, &app.theme)
        .progress(
            app.session.categories().len(),
            app.session.config().fetch.categories,
            app.session.status(),
        )
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(
        HotkeyBarWidget::new(app.input_mode, &app.theme),
        layout.hotkey_bar,
    );

    if let Some(modal) = view.modal.as_ref() {
        render_clue_dialog(frame, app, modal, area);
    }

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        " WHAT IS TRIVIA? ",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the clue dialog with either the answer input or the result
fn render_clue_dialog(frame: &mut Frame, app: &App, modal: &ModalView, area: Rect) {
    let popup_area = centered_rect_fixed(64, 14, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" ${} ", modal.value))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Question
            Constraint::Length(1), // Feedback
            Constraint::Length(3), // Input / result
        ])
        .split(inner);

    let question = Paragraph::new(modal.question.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true });
    frame.render_widget(question, chunks[0]);

    let view = app.session.presenter();
    if let Some(error) = view.user_error.as_deref() {
        frame.render_widget(
            Paragraph::new(Span::styled(error, app.theme.error_style())),
            chunks[1],
        );
    }

    match modal.reveal.as_ref() {
        Some(reveal) => {
            let verdict = if reveal.correct { "Correct!" } else { "Sorry, no." };
            let lines = vec![
                Line::from(Span::styled(verdict, app.theme.result_style(reveal.correct))),
                Line::from(vec![
                    Span::styled("Answer: ", app.theme.system_style()),
                    Span::raw(reveal.answer.as_str()),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[2]);
        }
        None => {
            let input = InputWidget::new(app.input_buffer(), &app.theme)
                .cursor_position(app.cursor_position())
                .active(app.input_mode == InputMode::Answer);
            frame.render_widget(input, chunks[2]);
        }
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(52, 18, area);
    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled(
            " What Is Trivia? - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Board:", heading)),
        Line::from("  ←↓↑→ or h/j/k/l   Move between clues"),
        Line::from("  Enter / Space     Open the selected clue"),
        Line::from("  ?                 Toggle this help"),
        Line::from("  q                 Quit"),
        Line::from(""),
        Line::from(Span::styled("Answering:", heading)),
        Line::from("  Phrase answers as \"What is ...\""),
        Line::from("  Enter             Submit"),
        Line::from("  Esc               Close the clue"),
        Line::from(""),
        Line::from("Correct answers add the clue's value to your score."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
