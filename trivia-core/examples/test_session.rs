//! Quick live check of the trivia engine against the real API

use jservice::JService;
use rand::{rngs::StdRng, SeedableRng};
use trivia_core::{FetchConfig, GameConfig, GameSession, RecordingPresenter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Testing Trivia Core ===\n");

    // Test 1: Load a small board
    println!("1. Loading two categories (this calls the trivia API)...");
    let config = GameConfig::new().with_fetch(
        FetchConfig::new()
            .with_categories(2)
            .with_max_failures(Some(20)),
    );
    let mut session = GameSession::new(config, RecordingPresenter::new());
    session.start();

    let mut pipeline = session.pipeline(JService::from_env()?, StdRng::seed_from_u64(42));
    let loaded = session.populate(&mut pipeline).await?;
    println!("   Loaded {loaded} categories after {} failed requests", pipeline.failures());

    // Test 2: Inspect the board
    println!("\n2. Board:");
    for category in session.categories() {
        println!("   {} ({} clues)", category.title, category.clue_ids.len());
    }

    // Test 3: Answer the first clue correctly
    println!("\n3. Answering the top-left clue...");
    let id = session.open_clue_at(0, 0)?;
    let answer = session
        .current_clue()
        .map(|(_, clue)| clue.answer.clone())
        .unwrap_or_default();
    let judgement = session.submit_answer(&format!("What is {answer}"), std::time::Instant::now())?;
    println!("   Clue {id}: correct = {}, score = {}", judgement.correct, judgement.total);

    println!("\n=== All tests passed! ===");
    Ok(())
}
