pub mod question;
pub use question::{Question, QuestionBatch};
