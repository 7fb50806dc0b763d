//! Trivia board TUI application.
//!
//! A terminal quiz board: pick a clue, answer in the form "What is ...",
//! and collect its point value when you're right.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a text-based interface suitable for automated testing:
//!
//! ```bash
//! cargo run -p trivia -- --headless --seed 7
//! ```

mod app;
mod events;
mod headless;
mod ui;
mod view;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jservice::JService;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;
use trivia_core::{spawn_fetch_worker, FetchConfig, GameConfig, GameSession};

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;
use view::BoardView;

#[derive(Debug, Parser)]
#[command(name = "trivia", version, about = "Terminal trivia board game")]
struct Args {
    /// Run in headless mode (text-only, no TUI)
    #[arg(long)]
    headless: bool,

    /// Base URL of the trivia API
    #[arg(long, env = "TRIVIA_API_BASE", default_value = jservice::API_BASE)]
    api_base: String,

    /// Number of categories on the board
    #[arg(long, default_value_t = trivia_core::fetch::DEFAULT_CATEGORIES)]
    categories: usize,

    /// Clues shown per category
    #[arg(long, default_value_t = trivia_core::fetch::DEFAULT_CLUES_PER_CATEGORY)]
    clues: usize,

    /// Give up loading after this many failed requests (0 retries forever)
    #[arg(long, default_value_t = 100)]
    max_failures: u32,

    /// Seed for category selection and clue order
    #[arg(long)]
    seed: Option<u64>,

    /// How long a result stays on screen, in milliseconds
    #[arg(long, default_value_t = 3000)]
    reveal_ms: u64,

    /// Log file used while the TUI owns the terminal
    #[arg(long, default_value = "trivia.log")]
    log_file: PathBuf,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let max_failures = (self.max_failures > 0).then_some(self.max_failures);
        let fetch = FetchConfig::new()
            .with_categories(self.categories)
            .with_clues_per_category(self.clues)
            .with_max_failures(max_failures);

        GameConfig::new()
            .with_fetch(fetch)
            .with_reveal_delay(Duration::from_millis(self.reveal_ms))
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Route logs to stderr in headless mode and to a file under the TUI.
fn init_tracing(args: &Args) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        let file = File::create(&args.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let config = args.game_config();
    let source = JService::with_base_url(&args.api_base)?;
    tracing::info!(
        api_base = %args.api_base,
        categories = args.categories,
        seed = ?args.seed,
        "starting trivia"
    );

    if args.headless {
        return headless::run_headless(config, source, args.rng())
            .await
            .map_err(|e| e.into());
    }

    let session = GameSession::new(config, BoardView::new());
    let pipeline = session.pipeline(source, args.rng());
    let fetch_rx = spawn_fetch_worker(pipeline);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(session, fetch_rx)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    match result {
        Ok(score) => println!("Final score: {score}"),
        Err(e) => eprintln!("Error: {e}"),
    }

    Ok(())
}

/// Drive the board until the player quits. Returns the final score.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<u32> {
    loop {
        app.poll_fetch();
        app.tick(Instant::now());

        terminal.draw(|f| render(f, &app))?;

        // Poll with a timeout so fetched categories and reveal timers show up
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if let EventResult::Quit = handle_event(&mut app, ev) {
                return Ok(app.session.score());
            }
        }

        if app.should_quit {
            return Ok(app.session.score());
        }
    }
}
