//! Headless mode for the trivia game.
//!
//! This module provides a simple text-based interface for running the game
//! without a TUI. It's designed for automated testing and scripted play.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use trivia_core::{
    Category, CategorySource, ClueId, ClueRecord, GameConfig, GameSession, Presenter,
    SessionError,
};
use rand::Rng;

/// A presenter that prints every event as a tagged line.
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        // stdout going away is not something the game can act on
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render_category(&mut self, category: &Category, clues: &[&ClueRecord]) {
        let cells: Vec<String> = category
            .clue_ids
            .iter()
            .zip(clues)
            .map(|(id, clue)| format!("{id}=${}", clue.value))
            .collect();
        self.line(format_args!("[CATEGORY] {} | {}", category.title, cells.join(" ")));
    }

    fn show_clue(&mut self, id: ClueId, clue: &ClueRecord) {
        self.line(format_args!("[CLUE {id}] (${}) {}", clue.value, clue.question));
    }

    fn show_result(&mut self, is_correct: bool, correct_answer: &str) {
        if is_correct {
            self.line(format_args!("[CORRECT] {correct_answer}"));
        } else {
            self.line(format_args!("[INCORRECT] The answer was: {correct_answer}"));
        }
    }

    fn hide_result(&mut self) {
        self.line(format_args!("[CLOSED]"));
    }

    fn update_score(&mut self, total: u32) {
        self.line(format_args!("[SCORE] {total}"));
    }

    fn report_user_error(&mut self, message: &str) {
        self.line(format_args!("[ERROR] {message}"));
    }

    fn board_failed(&mut self, loaded: usize) {
        self.line(format_args!(
            "[FAILED] Board stopped loading after {loaded} categories"
        ));
    }
}

/// Which clue an `#open` command refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTarget {
    Position { column: usize, row: usize },
    Id(ClueId),
}

/// A parsed line of headless input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Board,
    Open(OpenTarget),
    Score,
    Help,
    Quit,
    Answer(String),
    Invalid(String),
}

/// Parse one line of headless input.
///
/// Lines starting with `#` are commands, everything else is an answer.
/// Board positions are 1-based to match the printed board.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(command) = line.strip_prefix('#') else {
        return Command::Answer(line.to_string());
    };

    let parts: Vec<&str> = command.split_whitespace().collect();
    match parts.as_slice() {
        ["quit"] | ["exit"] => Command::Quit,
        ["board"] => Command::Board,
        ["score"] => Command::Score,
        ["help"] => Command::Help,
        ["open", id] => match id.parse::<ClueId>() {
            Ok(id) => Command::Open(OpenTarget::Id(id)),
            Err(e) => Command::Invalid(e.to_string()),
        },
        ["open", column, row] => match (column.parse::<usize>(), row.parse::<usize>()) {
            (Ok(column), Ok(row)) if column > 0 && row > 0 => Command::Open(OpenTarget::Position {
                column: column - 1,
                row: row - 1,
            }),
            _ => Command::Invalid("Usage: #open <column> <row> (1-based)".to_string()),
        },
        ["open", ..] => Command::Invalid("Usage: #open <column> <row> | #open <clue-id>".to_string()),
        _ => Command::Invalid("Unknown command. Type #help for help.".to_string()),
    }
}

/// Run the game in headless mode.
///
/// The board is loaded before any input is read. Then a simple
/// line-oriented protocol is served:
/// - Lines starting with `#` are commands (board, open, score, help, quit)
/// - All other lines are answers to the open clue
pub async fn run_headless<S, R>(config: GameConfig, source: S, rng: R) -> Result<(), SessionError>
where
    S: CategorySource,
    R: Rng,
{
    let mut session = GameSession::new(config, ConsolePresenter::new(io::stdout()));

    println!("=== Trivia Headless Mode ===");
    session.start();

    let mut pipeline = session.pipeline(source, rng);
    if let Err(e) = session.populate(&mut pipeline).await {
        if session.categories().is_empty() {
            return Err(e);
        }
    }

    println!();
    print_help();
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let now = Instant::now();
        session.tick(now);

        if !handle_command(&mut session, parse_command(&line), now) {
            println!("Goodbye!");
            break;
        }
    }

    println!("[FINAL SCORE] {}", session.score());
    Ok(())
}

/// Apply one command. Returns false when the player quits.
fn handle_command<W: Write>(
    session: &mut GameSession<ConsolePresenter<W>>,
    command: Command,
    now: Instant,
) -> bool {
    let result = match command {
        Command::Quit => return false,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Score => {
            println!("[SCORE] {}", session.score());
            Ok(())
        }
        Command::Board => {
            print_board(session);
            Ok(())
        }
        Command::Open(OpenTarget::Id(id)) => session.open_clue(id),
        Command::Open(OpenTarget::Position { column, row }) => {
            session.open_clue_at(column, row).map(|_| ())
        }
        Command::Answer(text) => session.submit_answer(&text, now).map(|_| ()),
        Command::Invalid(message) => {
            println!("[ERROR] {message}");
            Ok(())
        }
    };

    match result {
        // Already reported through the presenter
        Err(SessionError::Answer(_)) => {}
        Err(e) => println!("[ERROR] {e}"),
        Ok(()) => {}
    }
    true
}

fn print_board<W: Write>(session: &GameSession<ConsolePresenter<W>>) {
    println!("[BOARD]");
    for (column, category) in session.categories().iter().enumerate() {
        let cells: Vec<String> = category
            .clue_ids
            .iter()
            .filter_map(|id| {
                let clue = session.store().clue(id)?;
                let mark = if session.store().is_used(id) { "*" } else { "" };
                Some(format!("${}{mark}", clue.value))
            })
            .collect();
        println!("  {}. {} | {}", column + 1, category.title, cells.join(" "));
    }
}

fn print_help() {
    println!("Commands:");
    println!("  #board               - Show the board (* marks opened clues)");
    println!("  #open <col> <row>    - Open a clue by position (1-based)");
    println!("  #open <clue-id>      - Open a clue by id, e.g. #open 0-11531");
    println!("  #score               - Show the score");
    println!("  #help                - Show this help");
    println!("  #quit                - Exit the game");
    println!("  What is ...          - Answer the open clue");
}
