use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, RgenError};

/// JSON body sent to the hosted text-to-image model.
#[derive(Debug, Clone, Serialize)]
pub struct InferencePayload {
    pub inputs: String,
    pub options: InferenceOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    pub wait_for_model: bool,
}

impl InferencePayload {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            inputs: prompt.into(),
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }
}

/// A response that reached us from an upstream service, whatever its status.
/// Transport failures never produce one of these.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(false, |content_type| content_type.contains("image"))
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl GeneratedImage {
    /// Accepts the upstream body as an image, or turns it into a generation
    /// error carrying the body as diagnostic text.
    pub fn from_upstream(response: UpstreamResponse) -> Result<Self> {
        if !response.is_image() {
            let diagnostic = String::from_utf8_lossy(&response.body).into_owned();
            return Err(RgenError::GenerationError(diagnostic));
        }

        Ok(GeneratedImage {
            content_type: response.content_type.unwrap_or_default(),
            bytes: response.body,
        })
    }
}

/// Pulls the prompt out of a raw request body.
///
/// The body is either a JSON object or a JSON string holding a serialized
/// object. `Ok(None)` means the prompt is absent, empty or not a string;
/// malformed JSON is an error.
pub fn extract_prompt(body: &[u8]) -> Result<Option<String>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let mut value: Value = serde_json::from_slice(body)
        .map_err(|e| RgenError::SerializationError(format!("Invalid request body: {}", e)))?;

    if let Value::String(encoded) = &value {
        value = serde_json::from_str(encoded)
            .map_err(|e| RgenError::SerializationError(format!("Invalid request body: {}", e)))?;
    }

    let prompt = value
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|prompt| !prompt.is_empty())
        .map(str::to_string);

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inference_payload_shape() {
        let payload = serde_json::to_value(InferencePayload::new("a red fox")).unwrap();
        assert_eq!(
            payload,
            json!({ "inputs": "a red fox", "options": { "wait_for_model": true } })
        );
    }

    #[test]
    fn test_extract_prompt_from_object() {
        let prompt = extract_prompt(br#"{"prompt":"a red fox","extra":1}"#).unwrap();
        assert_eq!(prompt.as_deref(), Some("a red fox"));
    }

    #[test]
    fn test_extract_prompt_from_serialized_string() {
        let body = serde_json::to_vec(&json!("{\"prompt\":\"a red fox\"}")).unwrap();
        assert_eq!(extract_prompt(&body).unwrap().as_deref(), Some("a red fox"));
    }

    #[test]
    fn test_extract_prompt_missing_or_empty() {
        assert_eq!(extract_prompt(b"").unwrap(), None);
        assert_eq!(extract_prompt(b"  \n").unwrap(), None);
        assert_eq!(extract_prompt(b"{}").unwrap(), None);
        assert_eq!(extract_prompt(br#"{"prompt":""}"#).unwrap(), None);
        assert_eq!(extract_prompt(br#"{"prompt":null}"#).unwrap(), None);
        assert_eq!(extract_prompt(br#"{"prompt":42}"#).unwrap(), None);
        assert_eq!(extract_prompt(b"[1,2]").unwrap(), None);
    }

    #[test]
    fn test_extract_prompt_malformed() {
        let err = extract_prompt(b"{prompt:").unwrap_err();
        assert!(matches!(err, RgenError::SerializationError(_)));
    }

    #[test]
    fn test_generated_image_accepts_image_content_type() {
        let image = GeneratedImage::from_upstream(UpstreamResponse {
            status: 200,
            content_type: Some("image/png".into()),
            body: vec![0x89, b'P', b'N', b'G'],
        })
        .unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes.len(), 4);
    }

    #[test]
    fn test_generated_image_rejects_text() {
        let err = GeneratedImage::from_upstream(UpstreamResponse {
            status: 503,
            content_type: Some("application/json".into()),
            body: br#"{"error":"Model is currently loading"}"#.to_vec(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Model is currently loading"));

        let err = GeneratedImage::from_upstream(UpstreamResponse {
            status: 200,
            content_type: None,
            body: b"no header".to_vec(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("no header"));
    }
}
