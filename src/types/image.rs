//! Self-describing encoded images (`data:<mime>;base64,<payload>`).

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RepaintError;
use crate::utils::mime::guess_mime;

lazy_static! {
    static ref DATA_URL_RE: Regex =
        Regex::new(r"^data:([^;]+);base64,(.+)$").expect("data URL pattern is valid");
}

/// A MIME-tagged, base64-encoded image carried as one data URL string.
///
/// Construction never validates; a malformed value is only rejected when it is
/// split with [`EncodedImage::parts`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

/// Borrowed view of a well-formed data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrlParts<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

impl EncodedImage {
    /// Wrap an existing data URL string.
    pub fn new(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    /// Assemble a data URL from a MIME type and an already base64-encoded payload.
    pub fn from_parts(mime_type: &str, base64_data: &str) -> Self {
        Self(format!("data:{mime_type};base64,{base64_data}"))
    }

    /// Encode raw image bytes, sniffing the MIME type from magic numbers.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_parts(guess_mime(bytes, None), &STANDARD.encode(bytes))
    }

    /// Read and encode an image file; the extension is used when the bytes are not recognized.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, RepaintError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            RepaintError::InvalidInput(format!("Failed to read {}: {e}", path.display()))
        })?;
        let mime = guess_mime(&bytes, Some(path));
        Ok(Self::from_parts(mime, &STANDARD.encode(&bytes)))
    }

    /// Split into MIME type and base64 payload.
    pub fn parts(&self) -> Result<DataUrlParts<'_>, RepaintError> {
        let caps = DATA_URL_RE
            .captures(&self.0)
            .ok_or_else(|| RepaintError::InvalidInput("Invalid data URL format".to_string()))?;
        match (caps.get(1), caps.get(2)) {
            (Some(mime), Some(data)) => Ok(DataUrlParts {
                mime_type: mime.as_str(),
                data: data.as_str(),
            }),
            _ => Err(RepaintError::InvalidInput(
                "Invalid data URL format".to_string(),
            )),
        }
    }

    /// Decode the base64 payload into raw bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, RepaintError> {
        let parts = self.parts()?;
        STANDARD
            .decode(parts.data)
            .map_err(|e| RepaintError::InvalidInput(format!("Invalid base64 payload: {e}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EncodedImage {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EncodedImage {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for EncodedImage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parts_splits_mime_and_payload() {
        let image = EncodedImage::new("data:image/jpeg;base64,/9j/4AAQ");
        let parts = image.parts().unwrap();
        assert_eq!(parts.mime_type, "image/jpeg");
        assert_eq!(parts.data, "/9j/4AAQ");
    }

    #[test]
    fn malformed_urls_are_rejected() {
        for bad in [
            "",
            "not a data url",
            "data:image/png,AAAA",
            "data:;base64,AAAA",
            "data:image/png;base64,",
            "prefix data:image/png;base64,AAAA",
        ] {
            let err = EncodedImage::new(bad).parts().unwrap_err();
            assert_eq!(err.to_string(), "Invalid data URL format", "input: {bad:?}");
        }
    }

    #[test]
    fn from_parts_round_trips_through_parts() {
        let image = EncodedImage::from_parts("image/png", "AAA=");
        assert_eq!(image.as_str(), "data:image/png;base64,AAA=");
        assert_eq!(image.parts().unwrap().mime_type, "image/png");
    }

    #[test]
    fn from_bytes_sniffs_png() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let image = EncodedImage::from_bytes(&png);
        assert!(image.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(image.decode_bytes().unwrap(), png);
    }

    #[test]
    fn decode_rejects_bad_base64() {
        let err = EncodedImage::new("data:image/png;base64,***")
            .decode_bytes()
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid base64 payload"));
    }

    #[tokio::test]
    async fn from_file_falls_back_to_extension() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"not really a jpeg").unwrap();

        let image = EncodedImage::from_file(file.path()).await.unwrap();
        assert!(image.as_str().starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn from_file_reports_missing_file() {
        let err = EncodedImage::from_file("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
