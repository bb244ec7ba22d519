//! Transformation Session
//!
//! Wraps an [`ImageTransformer`] and exposes the processing lifecycle
//! (idle, processing, settled) that UI code observes.
//!
//! ```rust,no_run
//! use repaint::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), repaint::error::RepaintError> {
//! let client = GeminiClient::from_env()?;
//! let session = TransformationSession::new(Arc::new(client));
//!
//! let image = EncodedImage::from_file("house.jpg").await?;
//! session
//!     .invoke(image, ColorChoice::default(), Some(TransformationOptions::studio_defaults()))
//!     .await;
//!
//! if let Some(err) = session.error() {
//!     eprintln!("{err}");
//! }
//! # Ok(())
//! # }
//! ```

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::ErrorKind;
use crate::traits::ImageTransformer;
use crate::types::{
    ColorChoice, ConnectionStatus, EncodedImage, TransformationOptions, TransformationRequest,
    TransformationResult,
};

const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_processing: bool,
    pub output_image: Option<EncodedImage>,
    pub error: Option<String>,
}

/// Coarse lifecycle phase derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Processing,
    Succeeded,
    Failed,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.is_processing {
            SessionPhase::Processing
        } else if self.error.is_some() {
            SessionPhase::Failed
        } else if self.output_image.is_some() {
            SessionPhase::Succeeded
        } else {
            SessionPhase::Idle
        }
    }
}

/// How settlements of overlapping `invoke` calls are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// Every settlement updates state; the last one to arrive wins.
    #[default]
    LastWriteWins,
    /// Only the most recently started invoke may update state.
    LatestOnly,
}

/// Sequences transformations and owns the state UI code reads.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct TransformationSession {
    transformer: Arc<dyn ImageTransformer>,
    state: Arc<watch::Sender<SessionState>>,
    generation: Arc<AtomicU64>,
    policy: ConcurrencyPolicy,
}

impl fmt::Debug for TransformationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationSession")
            .field("state", &*self.state.borrow())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl TransformationSession {
    pub fn new(transformer: Arc<dyn ImageTransformer>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            transformer,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            policy: ConcurrencyPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ConcurrencyPolicy {
        self.policy
    }

    pub fn is_configured(&self) -> bool {
        self.transformer.is_configured()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_processing(&self) -> bool {
        self.state.borrow().is_processing
    }

    pub fn output_image(&self) -> Option<EncodedImage> {
        self.state.borrow().output_image.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Run one transformation and fold its outcome into the session state.
    ///
    /// On entry `is_processing` is set and `error` cleared. On settlement a
    /// success replaces `output_image`; a failure sets `error` and leaves any
    /// earlier image in place. The result is returned either way.
    ///
    /// The transformation runs on its own task: dropping the returned future
    /// stops waiting for it but does not abort the request, which still
    /// settles into the session state.
    pub async fn invoke(
        &self,
        image: EncodedImage,
        color: ColorChoice,
        options: Option<TransformationOptions>,
    ) -> TransformationResult {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, generation, color = %color.name, "invoke started");

        self.state.send_modify(|s| {
            s.is_processing = true;
            s.error = None;
        });

        let request = TransformationRequest::new(image, color).with_options(options);
        let task = tokio::spawn(self.clone().run(request, generation, request_id));
        match task.await {
            Ok(result) => result,
            Err(e) => {
                // The task never settled (runtime shutting down).
                tracing::error!(%request_id, error = %e, "transformation task lost");
                let result =
                    TransformationResult::failure(UNEXPECTED_ERROR_MESSAGE, ErrorKind::Internal);
                self.settle(generation, request_id, &result);
                result
            }
        }
    }

    async fn run(
        self,
        request: TransformationRequest,
        generation: u64,
        request_id: Uuid,
    ) -> TransformationResult {
        let result = match AssertUnwindSafe(self.transformer.transform(request))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(%request_id, %message, "transformer panicked");
                TransformationResult::failure(message, ErrorKind::Internal)
            }
        };
        self.settle(generation, request_id, &result);
        result
    }

    fn settle(&self, generation: u64, request_id: Uuid, result: &TransformationResult) {
        if self.policy == ConcurrencyPolicy::LatestOnly
            && generation != self.generation.load(Ordering::SeqCst)
        {
            tracing::debug!(%request_id, generation, "discarding stale settlement");
            return;
        }

        self.state.send_modify(|s| {
            s.is_processing = false;
            match result {
                TransformationResult::Success { output_image } => {
                    s.output_image = Some(output_image.clone());
                }
                TransformationResult::Failure { error, .. } => {
                    s.error = Some(error.clone());
                }
            }
        });
        tracing::debug!(%request_id, generation, success = result.is_success(), "invoke settled");
    }

    /// Forget the current error. Other fields are untouched.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Forget the current output image. Other fields are untouched.
    pub fn clear_output(&self) {
        self.state.send_if_modified(|s| s.output_image.take().is_some());
    }

    pub async fn test_connection(&self) -> ConnectionStatus {
        self.transformer.test_connection().await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        UNEXPECTED_ERROR_MESSAGE.to_string()
    }
}
