use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::RepaintError;

/// Optional refinements for a repaint. Unset fields mean "provider default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransformationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_roof: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_windows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_realism: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_lighting: Option<bool>,
    /// 0-100
    #[validate(range(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_intensity: Option<u8>,
    /// 0-100
    #[validate(range(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_realism: Option<u8>,
    /// 0-100
    #[validate(range(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_contrast: Option<u8>,
}

impl TransformationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The settings panel's initial values.
    pub fn studio_defaults() -> Self {
        Self {
            preserve_roof: Some(true),
            preserve_windows: Some(true),
            high_realism: Some(false),
            enhanced_lighting: Some(true),
            color_intensity: Some(85),
            texture_realism: Some(60),
            shadow_contrast: Some(40),
        }
    }

    pub fn with_preserve_roof(mut self, value: bool) -> Self {
        self.preserve_roof = Some(value);
        self
    }

    pub fn with_preserve_windows(mut self, value: bool) -> Self {
        self.preserve_windows = Some(value);
        self
    }

    pub fn with_high_realism(mut self, value: bool) -> Self {
        self.high_realism = Some(value);
        self
    }

    pub fn with_enhanced_lighting(mut self, value: bool) -> Self {
        self.enhanced_lighting = Some(value);
        self
    }

    pub fn with_color_intensity(mut self, value: u8) -> Self {
        self.color_intensity = Some(value);
        self
    }

    pub fn with_texture_realism(mut self, value: u8) -> Self {
        self.texture_realism = Some(value);
        self
    }

    pub fn with_shadow_contrast(mut self, value: u8) -> Self {
        self.shadow_contrast = Some(value);
        self
    }

    /// Check slider ranges.
    pub fn check(&self) -> Result<(), RepaintError> {
        self.validate().map_err(|e| {
            RepaintError::InvalidInput(format!("Invalid transformation options: {e}"))
        })
    }

    /// Prompt sentences for every knob that departs from the provider default.
    pub fn prompt_directives(&self) -> Vec<String> {
        let mut directives = Vec::new();

        if self.preserve_roof == Some(true) {
            directives.push("Do not change the roof.".to_string());
        }
        if self.preserve_windows == Some(true) {
            directives.push("Do not change the windows or their frames.".to_string());
        }
        if self.high_realism == Some(true) {
            directives.push("Render the result photorealistically.".to_string());
        }
        if self.enhanced_lighting == Some(true) {
            directives.push(
                "Keep the lighting natural and consistent with the original photo.".to_string(),
            );
        }
        if let Some(v) = self.color_intensity {
            directives.push(format!("Color intensity: {v}%."));
        }
        if let Some(v) = self.texture_realism {
            directives.push(format!("Texture realism: {v}%."));
        }
        if let Some(v) = self.shadow_contrast {
            directives.push(format!("Shadow contrast: {v}%."));
        }

        directives
    }
}
