pub mod accessor;
pub mod app;
pub mod bank;
pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use app::App;
pub use bank::{Catalog, DEFAULT_SUBJECT};
pub use config::{Cli, Config};
pub use error::{QuizError, Result};
pub use models::{AnswerRecord, AppState, ExamRecord, Question, QuestionKind, StudyProgress};
pub use session::{Effect, apply_effects};
