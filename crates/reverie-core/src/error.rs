//! Error types shared by every Reverie crate.

use thiserror::Error;

/// Errors surfaced by Reverie services.
///
/// Input problems are reported to the user immediately, pipeline failures
/// move a session into its error stage, and storage failures are logged.
#[derive(Error, Debug, Clone)]
pub enum ReverieError {
    #[error("{kind} '{id}' does not exist")]
    NotFound { kind: &'static str, id: String },

    /// User-supplied input was rejected before any state changed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing persisted data failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored or exchanged document could not be encoded or decoded
    #[error("Malformed {format}: {message}")]
    Serialization {
        format: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The analysis collaborator failed
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// The image generation collaborator failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// A broken invariant inside Reverie itself
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReverieError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// True for failures reported by the analysis or generation collaborator.
    pub fn is_pipeline_failure(&self) -> bool {
        matches!(self, Self::Analysis(_) | Self::Generation(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    fn malformed(format: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            format,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ReverieError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} ({:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ReverieError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed("JSON", err)
    }
}

impl From<toml::de::Error> for ReverieError {
    fn from(err: toml::de::Error) -> Self {
        Self::malformed("TOML", err)
    }
}

impl From<toml::ser::Error> for ReverieError {
    fn from(err: toml::ser::Error) -> Self {
        Self::malformed("TOML", err)
    }
}

/// Collaborator implementations built on `anyhow` surface as internal errors.
impl From<anyhow::Error> for ReverieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, ReverieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ReverieError::not_found("Theme", "noir");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Theme 'noir' does not exist");
    }

    #[test]
    fn test_pipeline_failure_classification() {
        assert!(ReverieError::analysis("timeout").is_pipeline_failure());
        assert!(ReverieError::generation("quota").is_pipeline_failure());
        assert!(!ReverieError::invalid_input("empty").is_pipeline_failure());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
        let err: ReverieError = parse_err.into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_io_errors_are_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let err = ReverieError::from(io);
        assert!(err.is_storage());
        assert!(err.to_string().contains("locked"));
    }
}
