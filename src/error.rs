use std::path::PathBuf;

/// Errors surfaced by the question bank loader and the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value or a bank record could not be (de)serialized.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("question bank {} is malformed: {source}", file.display())]
    Bank {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, QuizError>;
