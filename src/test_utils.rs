use crate::models::domain::{Question, QuestionBatch};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates question number `n` with its answer index cycling through 0..=3
    pub fn sample_question(n: usize) -> Question {
        Question {
            text: format!("Sample question {}?", n),
            options: (0..4).map(|o| format!("Option {}{}", n, o)).collect(),
            answer: ((n - 1) % 4) as u8,
        }
    }

    /// Creates the ten questions of a valid batch
    pub fn sample_questions() -> Vec<Question> {
        (1..=10).map(sample_question).collect()
    }

    pub fn sample_batch() -> QuestionBatch {
        QuestionBatch::try_from(sample_questions()).expect("sample questions form a valid batch")
    }

    /// A second valid batch distinguishable from `sample_batch`
    pub fn alternate_batch() -> QuestionBatch {
        let questions = sample_questions()
            .into_iter()
            .map(|mut q| {
                q.text = format!("Alternate {}", q.text);
                q
            })
            .collect::<Vec<_>>();
        QuestionBatch::try_from(questions).expect("alternate questions form a valid batch")
    }

    /// `sample_batch` as the bare JSON array a generator would return
    pub fn sample_payload() -> String {
        serde_json::to_string(&sample_questions()).expect("sample questions serialize")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_batch() {
        let batch = sample_batch();
        assert_eq!(batch.len(), 10);
        assert_eq!(batch.questions()[0].text, "Sample question 1?");
    }

    #[test]
    fn test_fixtures_answers_cover_every_index() {
        let answers: Vec<u8> = sample_questions().iter().map(|q| q.answer).collect();
        for index in 0..4 {
            assert!(answers.contains(&index));
        }
    }

    #[test]
    fn test_fixtures_alternate_batch_differs() {
        assert_ne!(sample_batch(), alternate_batch());
    }
}
