//! Google Gemini Provider
//!
//! Image editing through `generateContent` with inline image input and
//! `["TEXT", "IMAGE"]` response modalities.
//!
//! ```rust,no_run
//! use repaint::prelude::*;
//!
//! # async fn run() -> Result<(), repaint::error::RepaintError> {
//! let client = GeminiClient::new(GeminiConfig::new("your-api-key"))?;
//! let request = TransformationRequest::new(
//!     EncodedImage::new("data:image/png;base64,iVBORw0KGgo="),
//!     ColorChoice::find("Classic Navy").unwrap_or_default(),
//! );
//! let result = client.transform(request).await;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod convert;
pub mod types;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
