//! Image transformation capability trait

use async_trait::async_trait;

use crate::types::{ConnectionStatus, TransformationRequest, TransformationResult};

/// Something that can repaint an image.
///
/// Implementations are total: every failure is folded into the returned
/// [`TransformationResult`] instead of an `Err` or a panic.
#[async_trait]
pub trait ImageTransformer: Send + Sync {
    /// Whether a usable credential is present.
    fn is_configured(&self) -> bool;

    async fn transform(&self, request: TransformationRequest) -> TransformationResult;

    /// Cheap reachability/credential check against the backing service.
    ///
    /// Transformers that cannot probe report a failure rather than claiming a
    /// connection that was never checked.
    async fn test_connection(&self) -> ConnectionStatus {
        ConnectionStatus::failed("Connection test not supported by this transformer")
    }
}
