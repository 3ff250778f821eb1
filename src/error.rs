//! Error types shared by the mood engine, its persistence layer and the hosts.

use thiserror::Error;

/// Errors surfaced by the mood engine.
///
/// Validation failures (`EmptyMessage`, `UnknownAuthor`) are raised before any
/// state is touched. Everything else comes from the persistence collaborator.
#[derive(Error, Debug)]
pub enum MoodError {
    /// Message text was empty after trimming
    #[error("Message text must not be empty")]
    EmptyMessage,

    /// Author id does not reference a team member
    #[error("Unknown team member: {author_id}")]
    UnknownAuthor { author_id: String },

    /// SQLite error from the key/value store
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Stored document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// Generic persistence failure with context
    #[error("Persistence error in {context}: {message}")]
    Persistence { context: String, message: String },
}

impl MoodError {
    /// Create an unknown author error
    pub fn unknown_author(author_id: impl Into<String>) -> Self {
        Self::UnknownAuthor {
            author_id: author_id.into(),
        }
    }

    /// Create a persistence error with context
    pub fn persistence(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// 入力検証エラーかどうか
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyMessage | Self::UnknownAuthor { .. })
    }
}

/// Result alias used across the crate.
pub type MoodResult<T> = Result<T, MoodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MoodError::EmptyMessage.to_string(),
            "Message text must not be empty"
        );
        assert_eq!(
            MoodError::unknown_author("42").to_string(),
            "Unknown team member: 42"
        );
        assert_eq!(
            MoodError::persistence("save_messages", "disk full").to_string(),
            "Persistence error in save_messages: disk full"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(MoodError::EmptyMessage.is_validation());
        assert!(MoodError::unknown_author("x").is_validation());
        assert!(!MoodError::persistence("a", "b").is_validation());
        assert!(!MoodError::config("bad").is_validation());
    }
}
