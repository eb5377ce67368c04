//! Client for the Gemini generative image endpoint.
//!
//! One request carries the instruction text plus the input image as an
//! inline base64 part; the response is scanned for the first inline image
//! part. No retries are attempted: any failure is terminal for the attempt.

use serde::{Deserialize, Serialize};

use crate::data_uri;
use crate::error::{AppError, Result};
use crate::state::session::GeneratedImage;

/// Model identifier for image-to-image editing.
const MODEL: &str = "gemini-2.5-flash-image";

const ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Thin client around the `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Resolve the API credential from the environment.
    /// Checks `GEMINI_API_KEY` first, then `GOOGLE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| {
                AppError::Auth("GEMINI_API_KEY not set and no API key provided".into())
            })?;
        Ok(Self::new(api_key))
    }

    /// Submit one edit request: instruction text plus the encoded image.
    ///
    /// `payload` may be a full data URI or raw base64; the declared MIME type
    /// is forwarded, defaulting to JPEG when absent.
    pub async fn edit_image(&self, instruction: &str, payload: &str) -> Result<GeneratedImage> {
        let body = GeminiRequest::new(
            instruction,
            data_uri::declared_mime(payload),
            data_uri::strip_prefix(payload),
        );

        let url = format!("{}/{}:generateContent", ENDPOINT_BASE, MODEL);
        log::info!("submitting edit request to {}", MODEL);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log::warn!("endpoint returned {}: {}", status, text);
            return Err(map_http_error(status.as_u16(), text));
        }

        let parsed: GeminiResponse = response.json().await?;
        first_inline_image(parsed)
    }
}

fn map_http_error(status: u16, message: String) -> AppError {
    match status {
        401 | 403 => AppError::Auth(message),
        _ => AppError::Api { status, message },
    }
}

/// Scan the response for the first inline image part and turn it into a
/// displayable result. The endpoint may in principle return several image
/// parts; only the first is used.
fn first_inline_image(response: GeminiResponse) -> Result<GeneratedImage> {
    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .find_map(|part| part.inline_data)
        .ok_or(AppError::NoImageReturned)?;

    let mime = inline
        .mime_type
        .unwrap_or_else(|| data_uri::DEFAULT_RESULT_MIME.to_string());
    GeneratedImage::from_base64(&inline.data, mime)
}

// Wire types (camelCase JSON)

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

/// A request part is either instruction text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: RequestInlineData,
    },
}

#[derive(Debug, Serialize)]
struct RequestInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<String>,
}

impl GeminiRequest {
    fn new(instruction: &str, mime_type: &str, raw_base64: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Text {
                        text: instruction.to_string(),
                    },
                    RequestPart::InlineData {
                        inline_data: RequestInlineData {
                            mime_type: mime_type.to_string(),
                            data: raw_base64.to_string(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default, rename = "inlineData")]
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
struct ResponseInlineData {
    #[serde(default, rename = "mimeType")]
    mime_type: Option<String>,
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let req = GeminiRequest::new("Colorize this", "image/jpeg", "AAAA");
        let json = serde_json::to_value(&req).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "Colorize this");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "AAAA");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn test_first_inline_image_returns_data_uri() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } },
                        { "inlineData": { "mimeType": "image/webp", "data": "c2Vjb25k" } }
                    ]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let image = first_inline_image(response).unwrap();

        // First image part wins; later parts are ignored.
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.data_uri, "data:image/png;base64,aGVsbG8=");
        assert_eq!(image.bytes, b"hello");
    }

    #[test]
    fn test_missing_mime_defaults_to_png() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [ { "inlineData": { "data": "aGVsbG8=" } } ] }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let image = first_inline_image(response).unwrap();
        assert_eq!(image.mime, "image/png");
    }

    #[test]
    fn test_text_only_response_is_no_image() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [ { "text": "cannot comply" } ] }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            first_inline_image(response).unwrap_err(),
            AppError::NoImageReturned
        );
    }

    #[test]
    fn test_empty_response_is_no_image() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(
            first_inline_image(response).unwrap_err(),
            AppError::NoImageReturned
        );
    }

    #[test]
    fn test_http_error_mapping() {
        assert!(matches!(
            map_http_error(403, "bad key".into()),
            AppError::Auth(_)
        ));
        assert_eq!(
            map_http_error(500, "boom".into()),
            AppError::Api {
                status: 500,
                message: "boom".into()
            }
        );
    }
}
