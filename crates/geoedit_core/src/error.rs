//! Application error types for the feature gateway and editor.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),
}

/// Coarse error taxonomy surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request failed or the server answered with a non-2xx status.
    Network,
    /// Malformed GeoJSON or an unusable geometry/projection.
    Parse,
    /// The operation was requested in a state that does not allow it.
    Precondition,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::HttpStatus { .. } => ErrorKind::Network,
            Self::Json(_) | Self::Parse(_) | Self::UnsupportedProjection(_) => ErrorKind::Parse,
            Self::Precondition(_) => ErrorKind::Precondition,
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, ErrorKind};

    #[test]
    fn kinds_group_variants() {
        let status = AppError::HttpStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(status.kind(), ErrorKind::Network);
        assert_eq!(status.to_string(), "Server responded with 500: boom");

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AppError::from(json).kind(), ErrorKind::Parse);
        assert_eq!(
            AppError::UnsupportedProjection("EPSG:27700".into()).kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            AppError::precondition("nothing selected").kind(),
            ErrorKind::Precondition
        );
    }
}
