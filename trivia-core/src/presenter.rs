//! Presentation surface.
//!
//! The engine never draws anything itself. Everything the player sees goes
//! through a [`Presenter`], implemented by the terminal UI, the headless
//! console and the recording presenter used in tests.

use crate::board::{Category, ClueId, ClueRecord};

/// Calls the engine makes into the view layer.
pub trait Presenter {
    /// A category finished loading; add its column to the board.
    ///
    /// `clues` holds the records for `category.clue_ids`, in the same order.
    fn render_category(&mut self, category: &Category, clues: &[&ClueRecord]);

    /// Open the answer dialog for a clue.
    fn show_clue(&mut self, id: ClueId, clue: &ClueRecord);

    /// Reveal whether the submitted answer was right, with the correct answer.
    fn show_result(&mut self, is_correct: bool, correct_answer: &str);

    /// Dismiss the result reveal and close the dialog.
    fn hide_result(&mut self);

    /// Show the current score.
    fn update_score(&mut self, total: u32);

    /// Tell the player their input was rejected.
    fn report_user_error(&mut self, message: &str);

    /// The board stopped loading before it was full.
    fn board_failed(&mut self, _loaded: usize) {}
}
