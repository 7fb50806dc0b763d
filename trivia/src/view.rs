//! Board view model.
//!
//! `BoardView` is the presenter the terminal UI hands to the game session.
//! It keeps just enough state for the renderer to draw the board, the clue
//! dialog and the score without reaching into the engine.

use trivia_core::{Category, ClueId, ClueRecord, Presenter};

/// One clue cell on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub id: ClueId,
    pub value: u32,
}

/// One category column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub title: String,
    pub cells: Vec<CellView>,
}

/// Outcome shown in the dialog after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealView {
    pub correct: bool,
    pub answer: String,
}

/// The clue dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub id: ClueId,
    pub question: String,
    pub value: u32,
    pub reveal: Option<RevealView>,
}

/// Everything the renderer needs to draw a frame.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub modal: Option<ModalView>,
    pub score: u32,
    pub user_error: Option<String>,
    pub load_failed: Option<usize>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn is_revealing(&self) -> bool {
        self.modal.as_ref().is_some_and(|m| m.reveal.is_some())
    }

    /// Tallest column height.
    pub fn rows(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&CellView> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }
}

impl Presenter for BoardView {
    fn render_category(&mut self, category: &Category, clues: &[&ClueRecord]) {
        let cells = category
            .clue_ids
            .iter()
            .zip(clues)
            .map(|(id, clue)| CellView {
                id: *id,
                value: clue.value,
            })
            .collect();
        self.columns.push(ColumnView {
            title: category.title.clone(),
            cells,
        });
    }

    fn show_clue(&mut self, id: ClueId, clue: &ClueRecord) {
        self.user_error = None;
        self.modal = Some(ModalView {
            id,
            question: clue.question.clone(),
            value: clue.value,
            reveal: None,
        });
    }

    fn show_result(&mut self, is_correct: bool, correct_answer: &str) {
        self.user_error = None;
        if let Some(modal) = self.modal.as_mut() {
            modal.reveal = Some(RevealView {
                correct: is_correct,
                answer: correct_answer.to_string(),
            });
        }
    }

    fn hide_result(&mut self) {
        self.modal = None;
        self.user_error = None;
    }

    fn update_score(&mut self, total: u32) {
        self.score = total;
    }

    fn report_user_error(&mut self, message: &str) {
        self.user_error = Some(message.to_string());
    }

    fn board_failed(&mut self, loaded: usize) {
        self.load_failed = Some(loaded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: u32) -> ClueRecord {
        ClueRecord {
            question: format!("q{value}"),
            answer: format!("a{value}"),
            value,
        }
    }

    #[test]
    fn test_render_category_adds_column() {
        let mut view = BoardView::new();
        let category = Category {
            external_id: 4,
            title: "rivers".into(),
            clue_ids: vec![ClueId::new(0, 4), ClueId::new(1, 4)],
        };
        let (a, b) = (record(100), record(200));
        view.render_category(&category, &[&a, &b]);

        assert_eq!(view.columns.len(), 1);
        assert_eq!(view.columns[0].title, "rivers");
        assert_eq!(view.rows(), 2);
        assert_eq!(view.cell(0, 1).map(|c| c.value), Some(200));
        assert_eq!(view.cell(1, 0), None);
    }

    #[test]
    fn test_modal_lifecycle() {
        let mut view = BoardView::new();
        let id = ClueId::new(0, 1);
        view.show_clue(id, &record(100));
        assert!(view.is_modal_open());
        assert!(!view.is_revealing());

        view.report_user_error("bad format");
        assert_eq!(view.user_error.as_deref(), Some("bad format"));

        view.show_result(true, "<i>Paris</i>");
        assert!(view.is_revealing());
        assert!(view.user_error.is_none());

        view.hide_result();
        assert!(!view.is_modal_open());
    }

    #[test]
    fn test_score_and_failure() {
        let mut view = BoardView::new();
        view.update_score(700);
        view.board_failed(3);
        assert_eq!(view.score, 700);
        assert_eq!(view.load_failed, Some(3));
    }
}
