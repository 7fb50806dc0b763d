//! QA tests for filling the board.
//!
//! These tests verify the fetch pipeline through the session API:
//! - The board stops at the configured number of categories
//! - Failed requests never reach the board
//! - Short categories are accepted
//! - A failure ceiling puts the board into a terminal state
//!
//! Run with: `cargo test -p trivia-core --test qa_board_loading`

use rand::rngs::StdRng;
use rand::SeedableRng;
use trivia_core::testing::sample_payload;
use trivia_core::{
    BoardStatus, FetchConfig, FetchError, GameConfig, GameSession, MockSource, PresenterCall,
    RecordingPresenter, SessionError,
};

fn new_session(fetch: FetchConfig) -> GameSession<RecordingPresenter> {
    GameSession::new(
        GameConfig::new().with_fetch(fetch),
        RecordingPresenter::new(),
    )
}

// =============================================================================
// TARGET COUNT
// =============================================================================

#[tokio::test]
async fn test_stops_after_target_count() {
    let mut source = MockSource::new();
    for id in 1..=7 {
        source = source.succeed(sample_payload(id, &format!("cat {id}"), 5));
    }

    let mut session = new_session(FetchConfig::default());
    let mut pipeline = session.pipeline(source, StdRng::seed_from_u64(1));
    let loaded = session.populate(&mut pipeline).await.unwrap();

    assert_eq!(loaded, 5);
    assert_eq!(session.categories().len(), 5);
    assert_eq!(session.status(), BoardStatus::Ready);
    assert_eq!(pipeline.source().requested_ids().len(), 5);
    assert_eq!(pipeline.source().remaining(), 2);
}

#[tokio::test]
async fn test_every_category_rendered_in_order() {
    let source = MockSource::new()
        .succeed(sample_payload(10, "opera", 5))
        .succeed(sample_payload(20, "rivers", 5))
        .succeed(sample_payload(30, "potent potables", 5));

    let mut session = new_session(FetchConfig::new().with_categories(3));
    let mut pipeline = session.pipeline(source, StdRng::seed_from_u64(2));
    session.populate(&mut pipeline).await.unwrap();

    assert_eq!(
        session.presenter().rendered_titles(),
        vec!["opera", "rivers", "potent potables"]
    );
    for call in session.presenter().calls() {
        if let PresenterCall::RenderCategory { values, .. } = call {
            assert_eq!(values, &vec![100, 200, 300, 400, 500]);
        }
    }
}

// =============================================================================
// FAILURES
// =============================================================================

#[tokio::test]
async fn test_failed_fetch_not_counted() {
    let source = MockSource::new()
        .fail()
        .succeed(sample_payload(1, "first", 5))
        .fail_times(3)
        .succeed(sample_payload(2, "second", 5));

    let mut session = new_session(FetchConfig::new().with_categories(2));
    let mut pipeline = session.pipeline(source, StdRng::seed_from_u64(3));
    let loaded = session.populate(&mut pipeline).await.unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(pipeline.failures(), 4);
    let ids: Vec<u64> = session.categories().iter().map(|c| c.external_id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(session.store().clue_count(), 10);
}

#[tokio::test]
async fn test_failure_ceiling_marks_board_failed() {
    let source = MockSource::new()
        .succeed(sample_payload(1, "only", 5))
        .fail_times(50);

    let mut session = new_session(FetchConfig::new().with_max_failures(Some(10)));
    let mut pipeline = session.pipeline(source, StdRng::seed_from_u64(4));
    let result = session.populate(&mut pipeline).await;

    assert_eq!(
        result,
        Err(SessionError::Fetch(FetchError::Exhausted {
            loaded: 1,
            failures: 10
        }))
    );
    assert_eq!(session.status(), BoardStatus::Failed);
    assert_eq!(session.categories().len(), 1);
    assert_eq!(
        session.presenter().calls().last(),
        Some(&PresenterCall::BoardFailed(1))
    );
}

// =============================================================================
// CATEGORY SHAPE
// =============================================================================

#[tokio::test]
async fn test_short_category_has_fewer_clues() {
    let source = MockSource::new().succeed(sample_payload(8, "tiny", 3));

    let mut session = new_session(FetchConfig::new().with_categories(1));
    let mut pipeline = session.pipeline(source, StdRng::seed_from_u64(5));
    session.populate(&mut pipeline).await.unwrap();

    assert_eq!(session.categories()[0].clue_ids.len(), 3);
}

#[tokio::test]
async fn test_clues_are_a_subset_of_the_payload() {
    let payload = sample_payload(99, "big", 40);
    let source = MockSource::new().succeed(payload.clone());

    let mut session = new_session(FetchConfig::new().with_categories(1));
    let mut pipeline = session.pipeline(source, StdRng::seed_from_u64(6));
    session.populate(&mut pipeline).await.unwrap();

    let category = &session.categories()[0];
    assert_eq!(category.clue_ids.len(), 5);
    for (rank, id) in category.clue_ids.iter().enumerate() {
        assert_eq!(id.rank, rank);
        assert_eq!(id.category_id, 99);
        let clue = session.store().clue(id).unwrap();
        assert!(payload
            .clues
            .iter()
            .any(|c| c.question == clue.question && c.answer == clue.answer));
        assert_eq!(clue.value, (rank as u32 + 1) * 100);
    }
}

#[tokio::test]
async fn test_same_seed_same_board() {
    async fn board(seed: u64) -> Vec<String> {
        let source = MockSource::new().succeed(sample_payload(1, "x", 20));
        let mut session = new_session(FetchConfig::new().with_categories(1));
        let mut pipeline = session.pipeline(source, StdRng::seed_from_u64(seed));
        session.populate(&mut pipeline).await.unwrap();
        session.categories()[0]
            .clue_ids
            .iter()
            .map(|id| session.store().clue(id).unwrap().question.clone())
            .collect()
    }

    assert_eq!(board(42).await, board(42).await);
}
