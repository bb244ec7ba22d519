use secrecy::{ExposeSecret, SecretString};

use super::types::GenerationConfig;

/// Default Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default image-capable model.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-image-preview";

/// Key values that are known placeholders and never valid credentials.
pub const PLACEHOLDER_API_KEYS: &[&str] = &["your_api_key_here"];

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_BASE_URL: &str = "GEMINI_API_URL";
pub const ENV_MODEL: &str = "GEMINI_MODEL_NAME";

/// Gemini-specific configuration parameters
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: SecretString,
    /// Base URL for the Gemini API
    pub base_url: String,
    /// Model used for `generateContent`
    pub model: String,
    /// HTTP timeout in seconds; `None` leaves requests unbounded
    pub timeout: Option<u64>,
    /// Generation parameters attached to every request
    pub generation_config: GenerationConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            generation_config: GenerationConfig::image_editing(),
        }
    }
}

impl GeminiConfig {
    /// Create a new Gemini configuration with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Read `GEMINI_API_KEY`, `GEMINI_API_URL` and `GEMINI_MODEL_NAME`.
    ///
    /// A missing key yields an unconfigured config rather than an error.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new(lookup(ENV_API_KEY).unwrap_or_default());
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            config = config.with_model(model);
        }
        config
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::from(api_key.into());
        self
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set HTTP timeout
    pub const fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set generation configuration
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = config;
        self
    }

    /// The API key, if it is present and not a known placeholder.
    pub fn usable_api_key(&self) -> Option<&str> {
        let key = self.api_key.expose_secret();
        let trimmed = key.trim();
        if trimmed.is_empty() || PLACEHOLDER_API_KEYS.contains(&trimmed) {
            None
        } else {
            Some(key)
        }
    }

    pub fn is_configured(&self) -> bool {
        self.usable_api_key().is_some()
    }

    /// `<base>/models/<model>`
    pub fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.model)
        )
    }

    /// `<base>/models/<model>:generateContent`
    pub fn generate_content_url(&self) -> String {
        format!("{}:generateContent", self.model_url())
    }
}
