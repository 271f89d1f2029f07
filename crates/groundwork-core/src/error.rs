//! Error types for the groundwork library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all groundwork operations.
#[derive(Error, Debug)]
pub enum GroundworkError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Build plan not found for the given ID
    #[error("Build plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Step not found within a stored workflow
    #[error("Step with ID {step_id} not found in plan {plan_id}")]
    StepNotFound { plan_id: u64, step_id: u32 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// HTTP transport errors (page fetching, OpenAI calls)
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// Upstream API returned a non-success response or unusable payload
    #[error("API error: {0}")]
    Api(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl GroundworkError {
    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Creates a new HTTP error with additional context.
    pub fn http_error(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            message: message.into(),
            source,
        }
    }
}

/// Extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| GroundworkError::database_error(message, e))
    }
}

/// Result type alias for groundwork operations
pub type Result<T> = std::result::Result<T, GroundworkError>;
