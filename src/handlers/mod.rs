pub mod health_handler;
pub mod question_handler;
pub mod static_handler;

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use question_handler::generate_questions;
pub use static_handler::{index, logo, stylesheet};
