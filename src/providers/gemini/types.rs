//! Gemini wire types for `generateContent`.

use serde::{Deserialize, Serialize};

/// Gemini Generate Content Request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateContentRequest {
    /// Required. The content of the current conversation with the model.
    pub contents: Vec<Content>,
    /// Optional. Configuration options for model generation and outputs.
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

/// A single turn of content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<RequestPart>,
}

/// Outgoing part: either prompt text or an inline image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text { text: String },
    InlineData { inline_data: Blob },
}

/// Raw media bytes (base64) with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Configuration options for model generation and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Optional. Controls the randomness of the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Optional. The maximum number of tokens to consider when sampling.
    #[serde(skip_serializing_if = "Option::is_none", rename = "topK")]
    pub top_k: Option<i32>,
    /// Optional. The maximum cumulative probability of tokens to consider when sampling.
    #[serde(skip_serializing_if = "Option::is_none", rename = "topP")]
    pub top_p: Option<f64>,
    /// Optional. The maximum number of tokens to include in a candidate.
    #[serde(skip_serializing_if = "Option::is_none", rename = "maxOutputTokens")]
    pub max_output_tokens: Option<i32>,
    /// Optional. Output response modalities (e.g., ["TEXT", "IMAGE"]).
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseModalities")]
    pub response_modalities: Option<Vec<String>>,
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters used for repaint requests.
    pub fn image_editing() -> Self {
        Self::new()
            .with_temperature(1.0)
            .with_top_k(40)
            .with_top_p(0.95)
            .with_max_output_tokens(8192)
            .with_response_modalities(vec!["TEXT".to_string(), "IMAGE".to_string()])
    }

    /// Set temperature
    pub fn with_temperature(mut self, t: f64) -> Self {
        self.temperature = Some(t);
        self
    }
    /// Set top_k
    pub fn with_top_k(mut self, top_k: i32) -> Self {
        self.top_k = Some(top_k);
        self
    }
    /// Set top_p
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }
    /// Set max output tokens
    pub fn with_max_output_tokens(mut self, max: i32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
    /// Set response modalities
    pub fn with_response_modalities(mut self, modalities: Vec<String>) -> Self {
        self.response_modalities = Some(modalities);
        self
    }
}

/// Gemini Generate Content Response
///
/// Parts are kept as raw JSON: the provider names the image field either
/// `inline_data` or `inlineData`, and `convert::normalize_part` resolves that.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Slots may be `null`; a null first candidate counts as no candidate.
    #[serde(default)]
    pub candidates: Option<Vec<Option<Candidate>>>,
    #[serde(default, rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<serde_json::Value>>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageMetadata {
    #[serde(default, rename = "promptTokenCount")]
    pub prompt_token_count: Option<u32>,
    #[serde(default, rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u32>,
    #[serde(default, rename = "totalTokenCount")]
    pub total_token_count: Option<u32>,
}

/// Error envelope: `{"error": {"code": 400, "message": "...", "status": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
