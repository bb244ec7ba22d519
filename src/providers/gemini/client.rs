//! Gemini Client Implementation
//!
//! Sends repaint requests to `models/<model>:generateContent` and folds every
//! outcome into a [`TransformationResult`].

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;

use super::config::GeminiConfig;
use super::convert;
use super::types::GenerateContentResponse;
use crate::error::RepaintError;
use crate::traits::ImageTransformer;
use crate::types::{ConnectionStatus, EncodedImage, TransformationRequest, TransformationResult};

/// Gemini client that implements the `ImageTransformer` trait
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: HttpClient,
    /// Gemini configuration
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration
    pub fn new(config: GeminiConfig) -> Result<Self, RepaintError> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
            RepaintError::InternalError(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a new Gemini client with a custom HTTP client
    pub fn with_http_client(config: GeminiConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Create a client from `GEMINI_*` environment variables.
    pub fn from_env() -> Result<Self, RepaintError> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Repaint the image in `request`. Never fails: errors come back as
    /// [`TransformationResult::Failure`].
    #[tracing::instrument(
        name = "gemini.transform",
        skip_all,
        fields(model = %self.config.model, color = %request.target_color.name)
    )]
    pub async fn transform(&self, request: TransformationRequest) -> TransformationResult {
        // One read of the key serves both the gate and the URL.
        let Some(api_key) = self.config.usable_api_key() else {
            tracing::warn!("API key missing; request not sent");
            return RepaintError::MissingApiKey.into();
        };

        let result = self.try_transform(api_key, &request).await;
        match &result {
            Ok(_) => tracing::debug!("repaint request settled with an image"),
            Err(e) => tracing::warn!(kind = ?e.kind(), error = %e, "repaint request failed"),
        }
        result.into()
    }

    async fn try_transform(
        &self,
        api_key: &str,
        request: &TransformationRequest,
    ) -> Result<EncodedImage, RepaintError> {
        let body = convert::build_request(request, &self.config.generation_config)?;
        let url = self.config.generate_content_url();

        tracing::debug!(%url, "dispatching generateContent");
        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "generateContent responded");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = convert::error_message_from_body(&text).unwrap_or_else(|| {
                format!("API request failed with status {}", status.as_u16())
            });
            let code = status.as_u16();
            return Err(match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(details) => RepaintError::api_error_with_details(code, message, details),
                Err(_) => RepaintError::api_error(code, message),
            });
        }

        let text = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = ?usage.prompt_token_count,
                candidate_tokens = ?usage.candidates_token_count,
                "token usage"
            );
        }
        convert::extract_image(&parsed)
    }

    /// Probe the model resource to check reachability and the credential.
    #[tracing::instrument(name = "gemini.test_connection", skip_all, fields(model = %self.config.model))]
    pub async fn test_connection(&self) -> ConnectionStatus {
        let Some(api_key) = self.config.usable_api_key() else {
            return ConnectionStatus::failed("API key not configured");
        };

        let response = match self
            .http_client
            .get(self.config.model_url())
            .query(&[("key", api_key)])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                let e = RepaintError::from(e);
                tracing::warn!(error = %e, "connection probe failed");
                return ConnectionStatus::failed(match e {
                    RepaintError::HttpError(m) if m != crate::error::UNKNOWN_ERROR_MESSAGE => m,
                    _ => "Connection failed".to_string(),
                });
            }
        };

        let status = response.status();
        if status.is_success() {
            return ConnectionStatus::ok("API connection successful");
        }

        let text = response.text().await.unwrap_or_default();
        let message = convert::error_message_from_body(&text)
            .unwrap_or_else(|| format!("Connection failed with status {}", status.as_u16()));
        tracing::warn!(status = status.as_u16(), %message, "connection probe rejected");
        ConnectionStatus::failed(message)
    }
}

#[async_trait]
impl ImageTransformer for GeminiClient {
    fn is_configured(&self) -> bool {
        GeminiClient::is_configured(self)
    }

    async fn transform(&self, request: TransformationRequest) -> TransformationResult {
        GeminiClient::transform(self, request).await
    }

    async fn test_connection(&self) -> ConnectionStatus {
        GeminiClient::test_connection(self).await
    }
}
