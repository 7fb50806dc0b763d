//! Answer checking.
//!
//! Player answers must be phrased as a question ("What is ..."). The
//! remainder is compared against the stored answer after both sides are
//! run through [`canonicalize`].

use thiserror::Error;

/// Phrase every answer has to start with (case-insensitive).
pub const REQUIRED_PREFIX: &str = "What is ";

/// Rejections raised before an answer is compared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("Please answer in the format \"{REQUIRED_PREFIX}...\"")]
    Format,
}

/// Strip the required prefix from `input` and return the trimmed candidate.
pub fn candidate(input: &str) -> Result<&str, AnswerError> {
    let prefix_len = REQUIRED_PREFIX.len();
    match input.get(..prefix_len) {
        Some(head) if head.eq_ignore_ascii_case(REQUIRED_PREFIX) => {
            Ok(input[prefix_len..].trim())
        }
        _ => Err(AnswerError::Format),
    }
}

/// Normalize an answer so that cosmetic variations compare equal.
///
/// Lowercases, drops the first `<i>` and the first `</i>`, removes every
/// double quote, strips one leading `a ` and then one leading `an `
/// article, and finally removes every space. Only the first occurrence
/// of each tag is removed.
pub fn canonicalize(input: &str) -> String {
    let mut answer = input.to_lowercase();
    answer = answer.replacen("<i>", "", 1);
    answer = answer.replacen("</i>", "", 1);
    answer.retain(|c| c != '"');

    // Articles are matched before spaces go, otherwise "a " can never match.
    let trimmed = answer.trim();
    let trimmed = trimmed.strip_prefix("a ").unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix("an ").unwrap_or(trimmed);

    trimmed.chars().filter(|c| *c != ' ').collect::<String>().trim().to_string()
}

/// Check a raw player input against a stored answer.
pub fn evaluate(input: &str, stored_answer: &str) -> Result<bool, AnswerError> {
    let candidate = candidate(input)?;
    Ok(canonicalize(candidate) == canonicalize(stored_answer))
}
