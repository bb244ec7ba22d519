//! Request building and response normalization for Gemini repaint calls.

use serde_json::{Map, Value, json};

use super::types::{
    Blob, Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, RequestPart,
};
use crate::error::RepaintError;
use crate::types::{ColorChoice, EncodedImage, TransformationRequest};

/// Text-only replies are cut to this many characters in the error message.
pub const MAX_TEXT_PREVIEW_CHARS: usize = 200;

/// Base instruction for a color.
pub fn build_prompt(color: &ColorChoice) -> String {
    format!(
        "Paint the walls of the house in the selected color: {} ({})",
        color.name, color.hex
    )
}

/// Full prompt: the base instruction followed by one sentence per set option.
pub fn build_full_prompt(request: &TransformationRequest) -> String {
    let mut prompt = build_prompt(&request.target_color);
    if let Some(options) = &request.options {
        for directive in options.prompt_directives() {
            prompt.push(' ');
            prompt.push_str(&directive);
        }
    }
    prompt
}

/// Build the `generateContent` body; fails on a malformed image or out-of-range options.
pub fn build_request(
    request: &TransformationRequest,
    generation_config: &GenerationConfig,
) -> Result<GenerateContentRequest, RepaintError> {
    let image = request.image.parts()?;
    if let Some(options) = &request.options {
        options.check()?;
    }

    Ok(GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                RequestPart::Text {
                    text: build_full_prompt(request),
                },
                RequestPart::InlineData {
                    inline_data: Blob {
                        mime_type: image.mime_type.to_string(),
                        data: image.data.to_string(),
                    },
                },
            ],
        }],
        generation_config: generation_config.clone(),
    })
}

/// Canonical view of one response part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    InlineData { mime_type: String, data: String },
    Text(String),
    Other,
}

/// Map either wire naming (`inline_data`/`mime_type` or `inlineData`/`mimeType`)
/// onto [`ResponsePart`]. Snake case is checked first.
pub fn normalize_part(raw: &Value) -> ResponsePart {
    let Some(obj) = raw.as_object() else {
        return ResponsePart::Other;
    };

    let blob = [
        ("inline_data", ["mime_type", "mimeType"]),
        ("inlineData", ["mimeType", "mime_type"]),
    ]
    .into_iter()
    .find_map(|(field, mime_keys)| {
        let blob = obj.get(field)?.as_object()?;
        let mime_type = mime_keys
            .iter()
            .find_map(|k| blob.get(*k).and_then(Value::as_str))?;
        let data = blob.get("data").and_then(Value::as_str)?;
        Some((mime_type.to_string(), data.to_string()))
    });

    if let Some((mime_type, data)) = blob {
        return ResponsePart::InlineData { mime_type, data };
    }

    match obj.get("text").and_then(Value::as_str) {
        Some(text) => ResponsePart::Text(text.to_string()),
        None => ResponsePart::Other,
    }
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Pick the output image out of a parsed reply.
///
/// Precedence: no candidate, then the first inline image part, then the first
/// non-empty text part, then a structural diagnostic.
pub fn extract_image(response: &GenerateContentResponse) -> Result<EncodedImage, RepaintError> {
    let candidate = response
        .candidates
        .as_ref()
        .and_then(|c| c.first())
        .and_then(Option::as_ref)
        .ok_or(RepaintError::NoCandidates)?;

    let raw_parts: &[Value] = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.as_deref())
        .unwrap_or_default();
    let parts: Vec<ResponsePart> = raw_parts.iter().map(normalize_part).collect();

    if let Some(image) = parts.iter().find_map(|p| match p {
        ResponsePart::InlineData { mime_type, data } => {
            Some(EncodedImage::from_parts(mime_type, data))
        }
        _ => None,
    }) {
        return Ok(image);
    }

    if let Some(text) = parts.iter().find_map(|p| match p {
        ResponsePart::Text(text) if !text.is_empty() => Some(text.as_str()),
        _ => None,
    }) {
        return Err(RepaintError::TextInsteadOfImage(
            truncate_chars(text, MAX_TEXT_PREVIEW_CHARS).to_string(),
        ));
    }

    Err(RepaintError::UnexpectedResponse(describe_response(response)))
}

/// Shape summary used when a reply holds neither an image nor text.
pub fn describe_response(response: &GenerateContentResponse) -> Value {
    let candidate = response
        .candidates
        .as_ref()
        .and_then(|c| c.first())
        .and_then(Option::as_ref);
    let content = candidate.and_then(|c| c.content.as_ref());
    let parts = content.and_then(|c| c.parts.as_ref());

    let part_types: Option<Vec<Vec<String>>> = parts.map(|parts| {
        parts
            .iter()
            .map(|p| {
                p.as_object()
                    .map(|o| o.keys().cloned().collect())
                    .unwrap_or_default()
            })
            .collect()
    });

    let mut summary = Map::new();
    summary.insert("hasCandidates".into(), json!(response.candidates.is_some()));
    summary.insert(
        "candidateCount".into(),
        json!(response.candidates.as_ref().map(Vec::len)),
    );
    summary.insert("hasContent".into(), json!(content.is_some()));
    summary.insert("partsCount".into(), json!(parts.map(Vec::len)));
    summary.insert("partTypes".into(), json!(part_types));
    Value::Object(summary)
}

/// Best-effort human message from a non-2xx body.
pub fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransformationOptions;

    fn response(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    fn navy_request() -> TransformationRequest {
        TransformationRequest::new(
            EncodedImage::new("data:image/jpeg;base64,/9j/4AAQ"),
            ColorChoice::new("Classic Navy", "#1e3a8a"),
        )
    }

    #[test]
    fn prompt_embeds_name_and_hex() {
        assert_eq!(
            build_prompt(&ColorChoice::new("Classic Navy", "#1e3a8a")),
            "Paint the walls of the house in the selected color: Classic Navy (#1e3a8a)"
        );
    }

    #[test]
    fn full_prompt_appends_option_directives() {
        let request = navy_request().with_options(Some(
            TransformationOptions::new()
                .with_preserve_roof(true)
                .with_color_intensity(70),
        ));
        assert_eq!(
            build_full_prompt(&request),
            "Paint the walls of the house in the selected color: Classic Navy (#1e3a8a) \
             Do not change the roof. Color intensity: 70%."
        );
        assert_eq!(
            build_full_prompt(&navy_request()),
            build_prompt(&navy_request().target_color)
        );
    }

    #[test]
    fn request_body_shape() {
        let body = build_request(&navy_request(), &GenerationConfig::image_editing()).unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "contents": [{
                    "parts": [
                        {"text": "Paint the walls of the house in the selected color: Classic Navy (#1e3a8a)"},
                        {"inline_data": {"mime_type": "image/jpeg", "data": "/9j/4AAQ"}}
                    ]
                }],
                "generationConfig": {
                    "temperature": 1.0,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 8192,
                    "responseModalities": ["TEXT", "IMAGE"]
                }
            })
        );
    }

    #[test]
    fn request_rejects_bad_inputs() {
        let mut request = navy_request();
        request.image = EncodedImage::new("garbage");
        let err = build_request(&request, &GenerationConfig::new()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid data URL format");

        let request = navy_request()
            .with_options(Some(TransformationOptions::new().with_shadow_contrast(250)));
        let err = build_request(&request, &GenerationConfig::new()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Input);
    }

    #[test]
    fn both_naming_conventions_normalize_identically() {
        let snake = json!({"inline_data": {"mime_type": "image/png", "data": "AAA="}});
        let camel = json!({"inlineData": {"mimeType": "image/png", "data": "AAA="}});
        let mixed = json!({"inlineData": {"mime_type": "image/png", "data": "AAA="}});
        let expected = ResponsePart::InlineData {
            mime_type: "image/png".into(),
            data: "AAA=".into(),
        };
        assert_eq!(normalize_part(&snake), expected);
        assert_eq!(normalize_part(&camel), expected);
        assert_eq!(normalize_part(&mixed), expected);
    }

    #[test]
    fn snake_case_checked_first() {
        let both = json!({
            "inline_data": {"mime_type": "image/png", "data": "SNAKE"},
            "inlineData": {"mimeType": "image/webp", "data": "CAMEL"}
        });
        assert_eq!(
            normalize_part(&both),
            ResponsePart::InlineData {
                mime_type: "image/png".into(),
                data: "SNAKE".into()
            }
        );
    }

    #[test]
    fn incomplete_blob_is_not_an_image() {
        assert_eq!(
            normalize_part(&json!({"inlineData": {"data": "AAA="}})),
            ResponsePart::Other
        );
        assert_eq!(normalize_part(&json!("just a string")), ResponsePart::Other);
        assert_eq!(
            normalize_part(&json!({"text": "hi"})),
            ResponsePart::Text("hi".into())
        );
    }

    #[test]
    fn image_part_wins_over_earlier_text() {
        let resp = response(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Here is your house"},
                    {"inlineData": {"mimeType": "image/png", "data": "AAA="}}
                ]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(
            extract_image(&resp).unwrap().as_str(),
            "data:image/png;base64,AAA="
        );
    }

    #[test]
    fn missing_or_empty_candidates() {
        for body in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": null}),
            json!({"candidates": [null]}),
        ] {
            let err = extract_image(&response(body)).unwrap_err();
            assert_eq!(err, RepaintError::NoCandidates);
        }
    }

    #[test]
    fn text_only_reply_is_truncated() {
        let text = "x".repeat(500);
        let resp = response(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        }));
        let err = extract_image(&resp).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("API returned text instead of image: {}", "x".repeat(200))
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(300);
        assert_eq!(truncate_chars(&text, 200).chars().count(), 200);
        assert_eq!(truncate_chars("short", 200), "short");
    }

    #[test]
    fn unexpected_shape_reports_structure() {
        let resp = response(json!({
            "candidates": [{"content": {"parts": [{"thoughtSignature": "abc"}, {"text": ""}]}}]
        }));
        let err = extract_image(&resp).unwrap_err();
        let RepaintError::UnexpectedResponse(summary) = &err else {
            panic!("expected UnexpectedResponse, got {err:?}");
        };
        assert_eq!(
            summary,
            &json!({
                "hasCandidates": true,
                "candidateCount": 1,
                "hasContent": true,
                "partsCount": 2,
                "partTypes": [["thoughtSignature"], ["text"]]
            })
        );
        assert!(
            err.to_string()
                .starts_with("Unexpected API response format. Response structure: {")
        );
    }

    #[test]
    fn candidate_without_content_is_diagnosed() {
        let resp = response(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        let err = extract_image(&resp).unwrap_err();
        let RepaintError::UnexpectedResponse(summary) = err else {
            panic!("expected UnexpectedResponse");
        };
        assert_eq!(summary["hasContent"], json!(false));
        assert_eq!(summary["partsCount"], Value::Null);
    }

    #[test]
    fn error_body_message_extraction() {
        assert_eq!(
            error_message_from_body(r#"{"error":{"code":400,"message":"API key not valid"}}"#),
            Some("API key not valid".to_string())
        );
        assert_eq!(error_message_from_body("<html>502</html>"), None);
        assert_eq!(error_message_from_body(r#"{"error":{"message":""}}"#), None);
    }
}
