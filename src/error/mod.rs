//! Error Handling Module
//!
//! - Core error type (`RepaintError`) and its coarse `ErrorKind` tag
//! - Conversions from transport and JSON errors
//!
//! # Example
//!
//! ```rust,ignore
//! use repaint::error::{ErrorKind, RepaintError};
//!
//! let error = RepaintError::api_error(404, "Not found");
//! assert_eq!(error.kind(), ErrorKind::Transport);
//! ```

mod conversions;
pub mod types;

pub use types::*;
