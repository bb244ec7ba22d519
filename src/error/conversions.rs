//! Type Conversions for RepaintError
//!
//! From implementations for the transport and JSON errors that reach the client.

use super::types::RepaintError;

impl From<reqwest::Error> for RepaintError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        Self::http(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for RepaintError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
