//! Error types for the cook-along library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::SessionStatus;

/// Comprehensive error type for all cook-along operations.
#[derive(Error, Debug)]
pub enum CookAlongError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Recipe not found for the given ID
    #[error("Recipe with ID {id} not found")]
    RecipeNotFound { id: u64 },
    /// Timer not found in the current session
    #[error("Timer with ID {id} not found")]
    TimerNotFound { id: u64 },
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
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// An operation was attempted from a state that does not allow it
    #[error("Cannot {operation} while the session is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: SessionStatus,
    },
    /// A timer operation was attempted from a timer state that does not allow it
    #[error("Cannot {operation} timer {id}: {reason}")]
    InvalidTimerTransition {
        id: u64,
        operation: &'static str,
        reason: String,
    },
    /// Microphone or speech permission was not granted
    #[error("Voice permission denied: {message}")]
    PermissionDenied { message: String },
    /// Voice engine failures (recognition or synthesis)
    #[error("Voice engine error: {message}")]
    Voice { message: String },
    /// Conversational assistant failures (network, API, empty replies)
    #[error("Assistant error: {message}")]
    Assistant { message: String },
    /// The controller's session has been exited
    #[error("The cook-along session has ended")]
    SessionEnded,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CookAlongError {
        CookAlongError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CookAlongError {
        CookAlongError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CookAlongError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an assistant error from any displayable cause.
    pub fn assistant(message: impl Into<String>) -> Self {
        Self::Assistant {
            message: message.into(),
        }
    }

    /// Creates a voice engine error from any displayable cause.
    pub fn voice(message: impl Into<String>) -> Self {
        Self::Voice {
            message: message.into(),
        }
    }

    /// Whether the failure came from an external collaborator and can be
    /// retried by the user without changing anything locally.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Assistant { .. } | Self::Voice { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CookAlongError::database(message).with_source(e))
    }
}

/// Result type alias for cook-along operations
pub type Result<T> = std::result::Result<T, CookAlongError>;
