use serde::Serialize;

use super::pinning::PinnedResult;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const PROMPT_REQUIRED: &str = "Prompt is required";
pub const MISSING_SECRETS: &str = "Missing HUGGINGFACE_API_KEY or PINATA_JWT";
pub const GENERATION_FAILED: &str = "Image generation or upload failed";
pub const BODY_TOO_LARGE: &str = "Request body too large";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    pub prompt: String,
    pub ipfs_hash: String,
    pub gateway_url: String,
    pub ipfs_uri: String,
}

impl GenerationResponse {
    pub fn new(prompt: String, pinned: PinnedResult) -> Self {
        Self {
            success: true,
            prompt,
            ipfs_hash: pinned.content_address,
            gateway_url: pinned.gateway_url,
            ipfs_uri: pinned.content_uri,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseBody {
    Success(GenerationResponse),
    Error(ErrorResponse),
}

/// Transport-neutral result of one handled request.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl HandlerResponse {
    pub fn ok(body: GenerationResponse) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Success(body),
        }
    }

    pub fn error(status: u16, error: ErrorResponse) -> Self {
        Self {
            status,
            body: ResponseBody::Error(error),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.body)
            .unwrap_or_else(|_| serde_json::json!({ "error": GENERATION_FAILED }))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_omits_missing_details() {
        let response = HandlerResponse::error(405, ErrorResponse::new(METHOD_NOT_ALLOWED));
        assert_eq!(response.to_json(), json!({ "error": "Method not allowed" }));
    }

    #[test]
    fn test_success_body_is_camel_case() {
        let pinned = PinnedResult::new("Qm123", "https://gateway.pinata.cloud/ipfs/");
        let response = HandlerResponse::ok(GenerationResponse::new("cat".into(), pinned));
        assert_eq!(
            response.to_json(),
            json!({
                "success": true,
                "prompt": "cat",
                "ipfsHash": "Qm123",
                "gatewayUrl": "https://gateway.pinata.cloud/ipfs/Qm123",
                "ipfsUri": "ipfs://Qm123"
            })
        );
    }
}
