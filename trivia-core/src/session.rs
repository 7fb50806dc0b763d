//! GameSession - the primary public API for trivia gameplay.
//!
//! A session owns the clue store, the score and the clue selection state
//! machine, and reports every visible change to its [`Presenter`]:
//!
//! ```text
//! Idle --open--> Presenting --submit--> Revealing --tick/deadline--> Idle
//!                    ^                      |
//!                    +-------open-----------+
//! ```
//!
//! Opening a clue while a result is still showing cancels the pending
//! dismissal and hides the result before the new clue is shown. Time is
//! passed in explicitly so the dismissal timer is deterministic.

use crate::answer::{self, AnswerError};
use crate::board::{Category, ClueId, ClueRecord, ClueStore, POINT_STEP};
use crate::fetch::{CategorySource, FetchConfig, FetchError, FetchPipeline, FetchedCategory};
use crate::presenter::Presenter;
use crate::score::Score;
use rand::Rng;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// How long a result stays on screen before it is dismissed.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(3000);

/// Errors from GameSession operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Unknown clue: {0}")]
    UnknownClue(ClueId),

    #[error("No clue at column {column}, row {row}")]
    EmptyCell { column: usize, row: usize },

    #[error("No clue is waiting for an answer")]
    NotPresenting,

    #[error(transparent)]
    Answer(#[from] AnswerError),

    #[error("Board failed to load: {0}")]
    Fetch(#[from] FetchError),
}

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// How the board is filled.
    pub fetch: FetchConfig,

    /// Points per rank step.
    pub point_step: u32,

    /// Delay before a result reveal is dismissed.
    pub reveal_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            point_step: POINT_STEP,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn with_point_step(mut self, step: u32) -> Self {
        self.point_step = step;
        self
    }

    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }
}

/// Where the clue dialog is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No clue open.
    Idle,
    /// A clue is shown, awaiting an answer.
    Presenting { clue: ClueId },
    /// An answer was judged; the result is on screen until `dismiss_at`.
    Revealing {
        clue: ClueId,
        correct: bool,
        dismiss_at: Instant,
    },
}

/// Loading state of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStatus {
    Loading,
    Ready,
    Failed,
}

/// Outcome of a judged answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    pub clue: ClueId,
    pub correct: bool,
    /// Points added to the score (0 when wrong).
    pub awarded: u32,
    /// Score after this answer.
    pub total: u32,
    /// The stored answer text.
    pub answer: String,
}

/// A trivia game session.
pub struct GameSession<P> {
    config: GameConfig,
    presenter: P,
    store: ClueStore,
    score: Score,
    current_clue: Option<ClueId>,
    phase: Phase,
    status: BoardStatus,
}

impl<P: Presenter> GameSession<P> {
    /// Create a session with an empty board.
    pub fn new(config: GameConfig, presenter: P) -> Self {
        Self {
            config,
            presenter,
            store: ClueStore::new(),
            score: Score::new(),
            current_clue: None,
            phase: Phase::Idle,
            status: BoardStatus::Loading,
        }
    }

    /// Render the initial score.
    pub fn start(&mut self) {
        self.presenter.update_score(self.score.total());
    }

    /// Fill the board inline, rendering each category as it arrives.
    pub async fn populate<S, R>(
        &mut self,
        pipeline: &mut FetchPipeline<S, R>,
    ) -> Result<usize, SessionError>
    where
        S: CategorySource,
        R: Rng,
    {
        let result = pipeline.run(|category| self.add_category(category)).await;
        match result {
            Ok(loaded) => {
                self.finish_loading();
                Ok(loaded)
            }
            Err(e) => {
                self.fail_loading(&e);
                Err(e.into())
            }
        }
    }

    /// Build a pipeline from this session's fetch config.
    pub fn pipeline<S: CategorySource, R: Rng>(&self, source: S, rng: R) -> FetchPipeline<S, R> {
        FetchPipeline::new(source, rng, self.config.fetch.clone())
    }

    /// Store a fetched category and render its column.
    pub fn add_category(&mut self, fetched: FetchedCategory) {
        let category = self
            .store
            .insert_category(fetched, self.config.point_step)
            .clone();
        let clues: Vec<&ClueRecord> = category
            .clue_ids
            .iter()
            .filter_map(|id| self.store.clue(id))
            .collect();
        self.presenter.render_category(&category, &clues);
    }

    /// Mark the board as fully loaded.
    pub fn finish_loading(&mut self) {
        self.status = BoardStatus::Ready;
        info!(categories = self.store.category_count(), "board ready");
    }

    /// Mark the board as failed; no more categories will arrive.
    pub fn fail_loading(&mut self, error: &FetchError) {
        self.status = BoardStatus::Failed;
        warn!(error = %error, "board failed to load");
        self.presenter.board_failed(self.store.category_count());
    }

    /// Open a clue for answering.
    pub fn open_clue(&mut self, id: ClueId) -> Result<(), SessionError> {
        let clue = self
            .store
            .clue(&id)
            .cloned()
            .ok_or(SessionError::UnknownClue(id))?;

        if let Phase::Revealing { .. } = self.phase {
            debug!("cancelling pending reveal dismissal");
            self.presenter.hide_result();
        }

        self.store.mark_used(id);
        self.current_clue = Some(id);
        self.phase = Phase::Presenting { clue: id };
        debug!(clue_id = %id, "clue opened");
        self.presenter.show_clue(id, &clue);
        Ok(())
    }

    /// Open the clue at a board position.
    pub fn open_clue_at(&mut self, column: usize, row: usize) -> Result<ClueId, SessionError> {
        let id = self
            .store
            .clue_at(column, row)
            .ok_or(SessionError::EmptyCell { column, row })?;
        self.open_clue(id)?;
        Ok(id)
    }

    /// Judge the player's answer for the open clue.
    ///
    /// A badly phrased answer is reported to the player and leaves the
    /// clue open for another try.
    pub fn submit_answer(&mut self, input: &str, now: Instant) -> Result<Judgement, SessionError> {
        let Phase::Presenting { clue: id } = self.phase else {
            return Err(SessionError::NotPresenting);
        };
        let clue = self
            .store
            .clue(&id)
            .cloned()
            .ok_or(SessionError::UnknownClue(id))?;

        let correct = match answer::evaluate(input, &clue.answer) {
            Ok(correct) => correct,
            Err(e) => {
                self.presenter.report_user_error(&e.to_string());
                return Err(e.into());
            }
        };

        let awarded = if correct { clue.value } else { 0 };
        let total = if correct {
            let total = self.score.apply(awarded);
            self.presenter.update_score(total);
            total
        } else {
            self.score.total()
        };
        info!(clue_id = %id, correct, awarded, total, "answer judged");

        self.presenter.show_result(correct, &clue.answer);
        self.phase = Phase::Revealing {
            clue: id,
            correct,
            dismiss_at: now + self.config.reveal_delay,
        };

        Ok(Judgement {
            clue: id,
            correct,
            awarded,
            total,
            answer: clue.answer,
        })
    }

    /// Advance timers. Returns true if a reveal was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Revealing { dismiss_at, .. } if now >= dismiss_at => {
                self.phase = Phase::Idle;
                self.presenter.hide_result();
                true
            }
            _ => false,
        }
    }

    /// Close the dialog without answering (e.g. the player pressed Esc).
    pub fn close_clue(&mut self) {
        match self.phase {
            Phase::Idle => {}
            Phase::Presenting { .. } | Phase::Revealing { .. } => {
                self.phase = Phase::Idle;
                self.presenter.hide_result();
            }
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn store(&self) -> &ClueStore {
        &self.store
    }

    pub fn categories(&self) -> &[Category] {
        self.store.categories()
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    /// The clue most recently opened. Stays set after the dialog closes.
    pub fn current_clue(&self) -> Option<(ClueId, &ClueRecord)> {
        let id = self.current_clue?;
        self.store.clue(&id).map(|clue| (id, clue))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    /// Whether the board has loaded its target number of categories.
    pub fn is_ready(&self) -> bool {
        self.status == BoardStatus::Ready
    }
}
