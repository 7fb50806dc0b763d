//! Testing utilities for the trivia game.
//!
//! This module provides tools for integration testing:
//! - `MockSource` for deterministic category fetching without network calls
//! - `RecordingPresenter` for asserting on everything the engine shows
//! - `sample_payload` for building category payloads

use crate::board::{Category, ClueId, ClueRecord};
use crate::fetch::{CategorySource, SourceError};
use crate::presenter::Presenter;
use async_trait::async_trait;
use jservice::{CategoryPayload, CluePayload};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Build a category payload with `clues` numbered clues.
///
/// Clue `i` asks `"<title> question i"` with answer `"<title> answer i"`.
pub fn sample_payload(id: u64, title: &str, clues: usize) -> CategoryPayload {
    CategoryPayload {
        id,
        title: title.to_string(),
        clues: (0..clues)
            .map(|i| {
                CluePayload::new(
                    format!("{title} question {i}"),
                    format!("{title} answer {i}"),
                )
            })
            .collect(),
    }
}

/// A scripted outcome for one request.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this payload. Its own `id` is kept regardless of the requested id.
    Success(CategoryPayload),
    /// Fail the request.
    Failure,
}

#[derive(Debug, Default)]
struct MockState {
    outcomes: VecDeque<MockOutcome>,
    requested: Vec<u64>,
}

/// A category source that replays scripted outcomes in order.
///
/// Once the script runs out every further request fails.
#[derive(Debug, Default)]
pub struct MockSource {
    state: Mutex<MockState>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn succeed(self, payload: CategoryPayload) -> Self {
        self.push(MockOutcome::Success(payload));
        self
    }

    /// Queue one failed response.
    pub fn fail(self) -> Self {
        self.push(MockOutcome::Failure);
        self
    }

    /// Queue `times` failed responses.
    pub fn fail_times(self, times: usize) -> Self {
        for _ in 0..times {
            self.push(MockOutcome::Failure);
        }
        self
    }

    /// Ids requested so far, in order.
    pub fn requested_ids(&self) -> Vec<u64> {
        self.lock().requested.clone()
    }

    /// Scripted outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lock().outcomes.len()
    }

    fn push(&self, outcome: MockOutcome) {
        self.lock().outcomes.push_back(outcome);
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CategorySource for MockSource {
    async fn fetch_category(&self, id: u64) -> Result<CategoryPayload, SourceError> {
        let mut state = self.lock();
        state.requested.push(id);
        match state.outcomes.pop_front() {
            Some(MockOutcome::Success(payload)) => Ok(payload),
            Some(MockOutcome::Failure) => Err(SourceError::Status(500)),
            None => Err(SourceError::Transport("no scripted response".to_string())),
        }
    }
}

/// One call made into a presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    RenderCategory { title: String, values: Vec<u32> },
    ShowClue { id: ClueId, question: String },
    ShowResult { correct: bool, answer: String },
    HideResult,
    UpdateScore(u32),
    ReportUserError(String),
    BoardFailed(usize),
}

/// A presenter that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Last score reported, if any.
    pub fn last_score(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::UpdateScore(total) => Some(*total),
            _ => None,
        })
    }

    /// Titles of rendered categories, in render order.
    pub fn rendered_titles(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::RenderCategory { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn render_category(&mut self, category: &Category, clues: &[&ClueRecord]) {
        self.calls.push(PresenterCall::RenderCategory {
            title: category.title.clone(),
            values: clues.iter().map(|c| c.value).collect(),
        });
    }

    fn show_clue(&mut self, id: ClueId, clue: &ClueRecord) {
        self.calls.push(PresenterCall::ShowClue {
            id,
            question: clue.question.clone(),
        });
    }

    fn show_result(&mut self, is_correct: bool, correct_answer: &str) {
        self.calls.push(PresenterCall::ShowResult {
            correct: is_correct,
            answer: correct_answer.to_string(),
        });
    }

    fn hide_result(&mut self) {
        self.calls.push(PresenterCall::HideResult);
    }

    fn update_score(&mut self, total: u32) {
        self.calls.push(PresenterCall::UpdateScore(total));
    }

    fn report_user_error(&mut self, message: &str) {
        self.calls
            .push(PresenterCall::ReportUserError(message.to_string()));
    }

    fn board_failed(&mut self, loaded: usize) {
        self.calls.push(PresenterCall::BoardFailed(loaded));
    }
}
