//! # Repaint - house recoloring through Gemini image editing
//!
//! Takes a photo (as a data URL) and a paint color, asks Gemini to repaint the
//! walls, and hands back either the edited image or a single human-readable error.
//!
//! ## Layers
//!
//! - **Client** ([`providers::gemini::GeminiClient`]): encodes the request, calls
//!   `generateContent`, and normalizes every reply shape into a
//!   [`types::TransformationResult`]. It never returns `Err` and never panics on
//!   provider input.
//! - **Session** ([`session::TransformationSession`]): tracks
//!   `is_processing` / `output_image` / `error` across calls and lets UI code
//!   subscribe to transitions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repaint::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new(GeminiConfig::from_env())?;
//!     let session = TransformationSession::new(Arc::new(client));
//!
//!     let image = EncodedImage::from_file("house.jpg").await?;
//!     let navy = ColorChoice::find("Classic Navy").unwrap_or_default();
//!
//!     match session.invoke(image, navy, None).await {
//!         TransformationResult::Success { output_image } => println!("{}", output_image.as_str().len()),
//!         TransformationResult::Failure { error, .. } => eprintln!("{error}"),
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod providers;
pub mod session;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{ErrorKind, RepaintError};

pub mod prelude {
    pub use crate::error::{ErrorKind, RepaintError};
    pub use crate::providers::gemini::{GeminiClient, GeminiConfig, GenerationConfig};
    pub use crate::session::{ConcurrencyPolicy, SessionPhase, SessionState, TransformationSession};
    pub use crate::traits::ImageTransformer;
    pub use crate::types::{
        ColorChoice, ConnectionStatus, EncodedImage, TransformationOptions, TransformationRequest,
        TransformationResult,
    };
}
