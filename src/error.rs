//! Error types for Forage
//!
//! All modules use `ForageResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Forage operations
pub type ForageResult<T> = Result<T, ForageError>;

/// All errors that can occur in Forage
#[derive(Error, Debug)]
pub enum ForageError {
    // Remote search errors
    #[error("Error fetching recipes: {reason}")]
    Fetch { reason: String },

    #[error("No API key configured")]
    ApiKeyMissing,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache store errors
    #[error("Cache store error: {0}")]
    Store(#[from] rusqlite::Error),

    // Report errors
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl ForageError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a fetch error from any cause
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self::Fetch {
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ApiKeyMissing => Some(
                "Get a free key at https://spoonacular.com/food-api, then run: forage config set api.key <KEY>",
            ),
            Self::Fetch { .. } => Some("Check your network connection and API quota, then retry"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ForageError::fetch("connection refused");
        assert_eq!(
            err.to_string(),
            "Error fetching recipes: connection refused"
        );
    }

    #[test]
    fn error_hint() {
        assert!(ForageError::ApiKeyMissing
            .hint()
            .unwrap()
            .contains("config set api.key"));
        assert!(ForageError::User("oops".into()).hint().is_none());
    }
}
