//! Trivia board game engine.
//!
//! This crate provides:
//! - A sequential category fetch pipeline over a pluggable [`CategorySource`]
//! - A clue store keyed by `(rank, category id)`
//! - Answer checking with a required "What is ..." phrasing
//! - A session state machine that drives a pluggable [`Presenter`]
//!
//! # Quick Start
//!
//! ```ignore
//! use jservice::JService;
//! use rand::{rngs::StdRng, SeedableRng};
//! use trivia_core::{GameConfig, GameSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = GameSession::new(GameConfig::default(), MyPresenter::default());
//!     session.start();
//!
//!     let mut pipeline = session.pipeline(JService::new()?, StdRng::from_entropy());
//!     session.populate(&mut pipeline).await?;
//!
//!     let clue = session.open_clue_at(0, 0)?;
//!     let judgement = session.submit_answer("What is Paris", std::time::Instant::now())?;
//!     println!("{clue}: {}", judgement.correct);
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod board;
pub mod fetch;
pub mod presenter;
pub mod score;
pub mod session;
pub mod shuffle;
pub mod testing;

// Primary public API
pub use answer::{canonicalize, evaluate, AnswerError, REQUIRED_PREFIX};
pub use board::{Category, ClueId, ClueRecord, ClueStore};
pub use fetch::{
    spawn_fetch_worker, CategorySource, FetchConfig, FetchError, FetchEvent, FetchPipeline,
    FetchedCategory, SourceError,
};
pub use jservice::{CategoryPayload, CluePayload};
pub use presenter::Presenter;
pub use score::Score;
pub use session::{BoardStatus, GameConfig, GameSession, Judgement, Phase, SessionError};
pub use shuffle::shuffle;
pub use testing::{MockSource, PresenterCall, RecordingPresenter};
