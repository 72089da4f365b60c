use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};

pub const QUESTIONS_PER_BATCH: usize = 10;
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Validate)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    #[validate(length(equal = 4))]
    pub options: Vec<String>,
    #[validate(range(max = 3))]
    pub answer: u8, // index into options
}

impl Question {
    pub fn new(text: impl Into<String>, options: [&str; OPTIONS_PER_QUESTION], answer: u8) -> Self {
        Self {
            text: text.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
        }
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer as usize).map(String::as_str)
    }
}

/// One complete generation result. Only constructible through `TryFrom`, so a
/// value of this type always holds exactly ten well-formed questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Validate)]
#[serde(transparent)]
pub struct QuestionBatch {
    #[validate(length(equal = 10), nested)]
    questions: Vec<Question>,
}

impl QuestionBatch {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Rebuilds a batch from a reordering of this batch's own questions.
    pub(crate) fn from_reordered(questions: Vec<Question>) -> Self {
        debug_assert_eq!(questions.len(), QUESTIONS_PER_BATCH);
        Self { questions }
    }
}

impl TryFrom<Vec<Question>> for QuestionBatch {
    type Error = AppError;

    fn try_from(questions: Vec<Question>) -> AppResult<Self> {
        let batch = Self { questions };
        batch.validate()?;
        Ok(batch)
    }
}
