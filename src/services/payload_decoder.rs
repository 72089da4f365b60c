use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionBatch},
};

const FENCE: &str = "```";

// First fenced block, optional language tag on the opening fence.
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:[A-Za-z]+)?\s*(.*?)```").expect("fenced block pattern is valid")
});

/// Removes a markdown code fence around the payload if there is one.
pub fn strip_wrapping(payload: &str) -> AppResult<&str> {
    let trimmed = payload.trim();
    if !trimmed.contains(FENCE) {
        return Ok(trimmed);
    }

    FENCED_BLOCK
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str().trim())
        .ok_or_else(|| AppError::ParseFailure("unterminated fenced block".to_string()))
}

/// Turns raw generator output into a batch. The batch is all-or-nothing:
/// any malformed question rejects the whole payload.
pub fn decode_question_batch(payload: &str) -> AppResult<QuestionBatch> {
    let body = strip_wrapping(payload)?;
    if body.is_empty() {
        return Err(AppError::ParseFailure("empty payload".to_string()));
    }

    let questions: Vec<Question> = serde_json::from_str(body)?;
    QuestionBatch::try_from(questions)
}
