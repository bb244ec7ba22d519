use serde::{Deserialize, Serialize};

use super::EncodedImage;
use crate::error::{ErrorKind, RepaintError};

/// Outcome of one transformation: exactly an image or exactly an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ResultWire", try_from = "ResultWire")]
pub enum TransformationResult {
    Success { output_image: EncodedImage },
    Failure { error: String, kind: ErrorKind },
}

impl TransformationResult {
    pub fn success(output_image: EncodedImage) -> Self {
        Self::Success { output_image }
    }

    pub fn failure(error: impl Into<String>, kind: ErrorKind) -> Self {
        Self::Failure {
            error: error.into(),
            kind,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn output_image(&self) -> Option<&EncodedImage> {
        match self {
            Self::Success { output_image } => Some(output_image),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<RepaintError> for TransformationResult {
    fn from(err: RepaintError) -> Self {
        Self::failure(err.to_string(), err.kind())
    }
}

impl From<Result<EncodedImage, RepaintError>> for TransformationResult {
    fn from(result: Result<EncodedImage, RepaintError>) -> Self {
        match result {
            Ok(image) => Self::success(image),
            Err(err) => err.into(),
        }
    }
}

/// `{ success, outputImage?, error?, kind? }` as exchanged with UI code.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultWire {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_image: Option<EncodedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
}

impl From<TransformationResult> for ResultWire {
    fn from(result: TransformationResult) -> Self {
        match result {
            TransformationResult::Success { output_image } => Self {
                success: true,
                output_image: Some(output_image),
                error: None,
                kind: None,
            },
            TransformationResult::Failure { error, kind } => Self {
                success: false,
                output_image: None,
                error: Some(error),
                kind: Some(kind),
            },
        }
    }
}

impl TryFrom<ResultWire> for TransformationResult {
    type Error = String;

    fn try_from(wire: ResultWire) -> Result<Self, Self::Error> {
        match (wire.success, wire.output_image, wire.error) {
            (true, Some(output_image), None) => Ok(Self::Success { output_image }),
            (false, None, Some(error)) => Ok(Self::Failure {
                error,
                kind: wire.kind.unwrap_or(ErrorKind::Internal),
            }),
            (true, _, _) => Err("successful result must carry only outputImage".to_string()),
            (false, _, _) => Err("failed result must carry only error".to_string()),
        }
    }
}
