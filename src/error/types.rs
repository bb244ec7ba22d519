use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message reported when no usable API key is configured.
pub const MISSING_API_KEY_MESSAGE: &str =
    "API key not configured. Please set GEMINI_API_KEY in your environment.";

/// Fallback message for faults that carry no text of their own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Coarse classification of a failure.
///
/// The user-facing contract is the error string; this tag is an internal aid
/// for callers that want to branch (e.g. show a settings link for `Configuration`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Credential absent or placeholder
    Configuration,
    /// Malformed caller input (image, options)
    Input,
    /// Network failure, non-2xx status, unreadable body
    Transport,
    /// Well-formed reply lacking the expected fields
    ProtocolShape,
    /// Provider answered with text instead of an image
    ContentPolicy,
    /// Anything else
    Internal,
}

/// Errors produced while building, dispatching, or interpreting a repaint request.
///
/// `Display` yields exactly the message surfaced to end users.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepaintError {
    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    HttpError(String),

    /// Non-2xx reply; `message` is the provider's own message when one was present.
    #[error("{message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{0}")]
    ParseError(String),

    #[error("No response generated from the API")]
    NoCandidates,

    /// Holds the already-truncated text.
    #[error("API returned text instead of image: {0}")]
    TextInsteadOfImage(String),

    /// Holds a JSON description of what the reply contained.
    #[error("Unexpected API response format. Response structure: {0}")]
    UnexpectedResponse(serde_json::Value),

    #[error("{0}")]
    InternalError(String),
}

impl RepaintError {
    /// Build an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Build an `ApiError` carrying the raw error body.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// Transport error with the generic fallback when the source had no text.
    pub fn http(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::HttpError(UNKNOWN_ERROR_MESSAGE.to_string())
        } else {
            Self::HttpError(message)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey => ErrorKind::Configuration,
            Self::InvalidInput(_) => ErrorKind::Input,
            Self::HttpError(_) | Self::ApiError { .. } | Self::ParseError(_) => {
                ErrorKind::Transport
            }
            Self::NoCandidates | Self::UnexpectedResponse(_) => ErrorKind::ProtocolShape,
            Self::TextInsteadOfImage(_) => ErrorKind::ContentPolicy,
            Self::InternalError(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status code, when the failure came from a non-2xx reply.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_user_facing_messages() {
        assert_eq!(
            RepaintError::MissingApiKey.to_string(),
            "API key not configured. Please set GEMINI_API_KEY in your environment."
        );
        assert_eq!(
            RepaintError::NoCandidates.to_string(),
            "No response generated from the API"
        );
        assert_eq!(
            RepaintError::TextInsteadOfImage("sorry".into()).to_string(),
            "API returned text instead of image: sorry"
        );
        assert_eq!(
            RepaintError::api_error(403, "API key not valid").to_string(),
            "API key not valid"
        );
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(RepaintError::MissingApiKey.kind(), ErrorKind::Configuration);
        assert_eq!(
            RepaintError::InvalidInput("x".into()).kind(),
            ErrorKind::Input
        );
        assert_eq!(RepaintError::api_error(500, "x").kind(), ErrorKind::Transport);
        assert_eq!(RepaintError::NoCandidates.kind(), ErrorKind::ProtocolShape);
        assert_eq!(
            RepaintError::TextInsteadOfImage("x".into()).kind(),
            ErrorKind::ContentPolicy
        );
    }

    #[test]
    fn empty_transport_message_falls_back() {
        assert_eq!(RepaintError::http("  ").to_string(), "Unknown error occurred");
        assert_eq!(RepaintError::http("dns failure").to_string(), "dns failure");
    }

    #[test]
    fn status_code_only_for_api_errors() {
        assert_eq!(RepaintError::api_error(429, "slow down").status_code(), Some(429));
        assert_eq!(RepaintError::NoCandidates.status_code(), None);
    }
}
