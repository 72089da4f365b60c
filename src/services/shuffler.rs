use rand::{seq::SliceRandom, Rng};

use crate::models::domain::QuestionBatch;

/// Returns the batch's questions in a uniformly random order. Options inside
/// each question and their answer indices are left as they are.
pub fn shuffle(batch: &QuestionBatch) -> QuestionBatch {
    shuffle_with(batch, &mut rand::thread_rng())
}

pub fn shuffle_with<R: Rng + ?Sized>(batch: &QuestionBatch, rng: &mut R) -> QuestionBatch {
    let mut questions = batch.questions().to_vec();
    questions.shuffle(rng);
    QuestionBatch::from_reordered(questions)
}
