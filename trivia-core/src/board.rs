//! Clue store: categories and the clues they own.
//!
//! Categories are kept in the order they finished loading. Every clue is
//! keyed by a [`ClueId`] built from its rank inside the category and the
//! category's id on the remote API.

use crate::fetch::FetchedCategory;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Points added per rank step: the first clue is worth 100, the fifth 500.
pub const POINT_STEP: u32 = 100;

/// Error parsing a clue id from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid clue id: {0} (expected <rank>-<category id>)")]
pub struct ParseClueIdError(String);

/// Unique key for a clue: `(rank, category id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClueId {
    /// 0-based position inside the category.
    pub rank: usize,
    /// Identifier of the category on the remote API.
    pub category_id: u64,
}

impl ClueId {
    pub fn new(rank: usize, category_id: u64) -> Self {
        Self { rank, category_id }
    }
}

impl fmt::Display for ClueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.rank, self.category_id)
    }
}

impl FromStr for ClueId {
    type Err = ParseClueIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rank, category_id) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ParseClueIdError(s.to_string()))?;
        let rank = rank.parse().map_err(|_| ParseClueIdError(s.to_string()))?;
        let category_id = category_id
            .parse()
            .map_err(|_| ParseClueIdError(s.to_string()))?;
        Ok(Self { rank, category_id })
    }
}

/// A single clue. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueRecord {
    /// Text shown to the player.
    pub question: String,
    /// Correct answer as sent by the API (may carry `<i>` markup).
    pub answer: String,
    /// Point value, `(rank + 1) * POINT_STEP`.
    pub value: u32,
}

/// A board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub external_id: u64,
    pub title: String,
    /// Clues in rank order.
    pub clue_ids: Vec<ClueId>,
}

/// Point value for a 0-based rank.
pub fn clue_value(rank: usize, point_step: u32) -> u32 {
    u32::try_from(rank + 1)
        .unwrap_or(u32::MAX)
        .saturating_mul(point_step)
}

/// All categories and clues loaded in this session.
#[derive(Debug, Clone, Default)]
pub struct ClueStore {
    categories: Vec<Category>,
    clues: HashMap<ClueId, ClueRecord>,
    used: HashSet<ClueId>,
}

impl ClueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a fetched category into a board column and store its clues.
    ///
    /// A clue id that is already present is overwritten. This only happens
    /// when the same remote category was drawn twice.
    pub fn insert_category(&mut self, fetched: FetchedCategory, point_step: u32) -> &Category {
        let FetchedCategory {
            external_id,
            title,
            clues,
        } = fetched;

        let mut clue_ids = Vec::with_capacity(clues.len());
        for (rank, clue) in clues.into_iter().enumerate() {
            let id = ClueId::new(rank, external_id);
            let record = ClueRecord {
                question: clue.question,
                answer: clue.answer,
                value: clue_value(rank, point_step),
            };
            if self.clues.insert(id, record).is_some() {
                warn!(clue_id = %id, "clue id collision, previous clue replaced");
            }
            clue_ids.push(id);
        }

        self.categories.push(Category {
            external_id,
            title,
            clue_ids,
        });
        &self.categories[self.categories.len() - 1]
    }

    pub fn clue(&self, id: &ClueId) -> Option<&ClueRecord> {
        self.clues.get(id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    /// Clue id at a board position (column = category, row = rank).
    pub fn clue_at(&self, column: usize, row: usize) -> Option<ClueId> {
        self.categories
            .get(column)
            .and_then(|c| c.clue_ids.get(row))
            .copied()
    }

    /// Remember that a clue has been opened.
    pub fn mark_used(&mut self, id: ClueId) {
        self.used.insert(id);
    }

    pub fn is_used(&self, id: &ClueId) -> bool {
        self.used.contains(id)
    }

    /// Number of rows in the tallest column.
    pub fn max_rows(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.clue_ids.len())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jservice::CluePayload;

    fn fetched(id: u64, clues: usize) -> FetchedCategory {
        FetchedCategory {
            external_id: id,
            title: format!("category {id}"),
            clues: (0..clues)
                .map(|i| CluePayload::new(format!("q{i}"), format!("a{i}")))
                .collect(),
        }
    }

    #[test]
    fn test_clue_id_display_and_parse() {
        let id = ClueId::new(3, 11531);
        assert_eq!(id.to_string(), "3-11531");
        assert_eq!("3-11531".parse::<ClueId>(), Ok(id));
        assert!("3".parse::<ClueId>().is_err());
        assert!("x-1".parse::<ClueId>().is_err());
        assert!("1-".parse::<ClueId>().is_err());
    }

    #[test]
    fn test_clue_value_by_rank() {
        assert_eq!(clue_value(0, POINT_STEP), 100);
        assert_eq!(clue_value(4, POINT_STEP), 500);
    }

    #[test]
    fn test_insert_category_builds_records() {
        let mut store = ClueStore::new();
        let category = store.insert_category(fetched(42, 5), POINT_STEP).clone();

        assert_eq!(category.title, "category 42");
        assert_eq!(category.clue_ids.len(), 5);
        assert_eq!(category.clue_ids[0], ClueId::new(0, 42));

        let last = store.clue(&ClueId::new(4, 42)).unwrap();
        assert_eq!(last.question, "q4");
        assert_eq!(last.answer, "a4");
        assert_eq!(last.value, 500);
        assert_eq!(store.clue_count(), 5);
    }

    #[test]
    fn test_short_category_accepted() {
        let mut store = ClueStore::new();
        store.insert_category(fetched(9, 2), POINT_STEP);
        assert_eq!(store.categories()[0].clue_ids.len(), 2);
        assert_eq!(store.max_rows(), 2);
        assert_eq!(store.clue_at(0, 2), None);
    }

    #[test]
    fn test_categories_keep_insertion_order() {
        let mut store = ClueStore::new();
        store.insert_category(fetched(3, 1), POINT_STEP);
        store.insert_category(fetched(1, 1), POINT_STEP);
        store.insert_category(fetched(2, 1), POINT_STEP);

        let ids: Vec<u64> = store.categories().iter().map(|c| c.external_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(store.clue_at(1, 0), Some(ClueId::new(0, 1)));
    }

    #[test]
    fn test_duplicate_category_overwrites_clues() {
        let mut store = ClueStore::new();
        store.insert_category(fetched(5, 3), POINT_STEP);
        let mut again = fetched(5, 3);
        again.clues[0] = CluePayload::new("replaced", "new");
        store.insert_category(again, POINT_STEP);

        assert_eq!(store.category_count(), 2);
        assert_eq!(store.clue_count(), 3);
        assert_eq!(store.clue(&ClueId::new(0, 5)).unwrap().question, "replaced");
    }

    #[test]
    fn test_used_tracking() {
        let mut store = ClueStore::new();
        store.insert_category(fetched(1, 2), POINT_STEP);
        let id = ClueId::new(1, 1);
        assert!(!store.is_used(&id));
        store.mark_used(id);
        assert!(store.is_used(&id));
    }
}
