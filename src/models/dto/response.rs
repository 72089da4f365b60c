use serde::Serialize;

use crate::models::domain::QuestionBatch;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: QuestionBatch,
}

impl From<QuestionBatch> for GenerateQuestionsResponse {
    fn from(questions: QuestionBatch) -> Self {
        GenerateQuestionsResponse { questions }
    }
}
