//! Shared fixtures for the mock-server tests.
#![allow(dead_code)]

use repaint::prelude::*;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const MODEL: &str = "gemini-test-image";
pub const GENERATE_PATH: &str = "/models/gemini-test-image:generateContent";
pub const MODEL_PATH: &str = "/models/gemini-test-image";

/// 10x10 solid red PNG.
pub const RED_PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAoAAAAKCAIAAAACUFjqAAAAEklEQVR4nGP4z8CAB+GTG8HSALfKY52fTcuYAAAAAElFTkSuQmCC";
pub const RED_PIXEL_PAYLOAD: &str = "iVBORw0KGgoAAAANSUhEUgAAAAoAAAAKCAIAAAACUFjqAAAAEklEQVR4nGP4z8CAB+GTG8HSALfKY52fTcuYAAAAAElFTkSuQmCC";

pub fn config(server: &MockServer) -> GeminiConfig {
    GeminiConfig::new(API_KEY)
        .with_base_url(server.uri())
        .with_model(MODEL)
}

pub fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(config(server)).expect("client builds")
}

pub fn navy() -> ColorChoice {
    ColorChoice::new("Classic Navy", "#1e3a8a")
}

pub fn red_request() -> TransformationRequest {
    TransformationRequest::new(EncodedImage::new(RED_PIXEL_PNG), navy())
}

/// A reply with one candidate holding the given parts.
pub fn reply_with_parts(parts: Value) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": parts},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 1290,
            "candidatesTokenCount": 1120,
            "totalTokenCount": 2410
        }
    })
}
