//! Core value types shared by the client and the session.

mod color;
mod image;
mod options;
mod result;

pub use color::ColorChoice;
pub use image::{DataUrlParts, EncodedImage};
pub use options::TransformationOptions;
pub use result::TransformationResult;

use serde::{Deserialize, Serialize};

/// One repaint request, built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationRequest {
    pub image: EncodedImage,
    pub target_color: ColorChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TransformationOptions>,
}

impl TransformationRequest {
    pub fn new(image: EncodedImage, target_color: ColorChoice) -> Self {
        Self {
            image,
            target_color,
            options: None,
        }
    }

    pub fn with_options(mut self, options: Option<TransformationOptions>) -> Self {
        self.options = options;
        self
    }
}

/// Result of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
