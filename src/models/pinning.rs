use serde::{Deserialize, Serialize};

pub const IPFS_URI_SCHEME: &str = "ipfs://";
pub const UPLOAD_FILE_NAME: &str = "ai-image.png";
pub const UPLOAD_CONTENT_TYPE: &str = "image/png";
pub const UPLOAD_METADATA_NAME: &str = "ai-generated-image";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinataMetadata {
    pub name: String,
}

/// A named file upload for the pin-file endpoint.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub metadata: PinataMetadata,
}

impl FileUpload {
    pub fn generated_image(bytes: Vec<u8>) -> Self {
        Self {
            file_name: UPLOAD_FILE_NAME.to_string(),
            content_type: UPLOAD_CONTENT_TYPE.to_string(),
            bytes,
            metadata: PinataMetadata {
                name: UPLOAD_METADATA_NAME.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinResponse {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pub pin_size: Option<u64>,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedResult {
    pub content_address: String,
    pub gateway_url: String,
    pub content_uri: String,
}

impl PinnedResult {
    pub fn new(content_address: impl Into<String>, gateway_prefix: &str) -> Self {
        let content_address = content_address.into();
        Self {
            gateway_url: format!("{}{}", gateway_prefix, content_address),
            content_uri: format!("{}{}", IPFS_URI_SCHEME, content_address),
            content_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinned_result_urls() {
        let pinned = PinnedResult::new("Qm123", "https://gateway.pinata.cloud/ipfs/");
        assert_eq!(pinned.content_address, "Qm123");
        assert_eq!(pinned.gateway_url, "https://gateway.pinata.cloud/ipfs/Qm123");
        assert_eq!(pinned.content_uri, "ipfs://Qm123");
    }

    #[test]
    fn test_pin_response_parsing() {
        let response: PinResponse = serde_json::from_str(
            r#"{"IpfsHash":"QmAbc","PinSize":2048,"Timestamp":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(response.ipfs_hash, "QmAbc");
        assert_eq!(response.pin_size, Some(2048));

        let minimal: PinResponse = serde_json::from_str(r#"{"IpfsHash":"QmAbc"}"#).unwrap();
        assert!(minimal.timestamp.is_none());

        assert!(serde_json::from_str::<PinResponse>(r#"{"error":"nope"}"#).is_err());
    }

    #[test]
    fn test_generated_image_upload() {
        let upload = FileUpload::generated_image(vec![1, 2, 3]);
        assert_eq!(upload.file_name, "ai-image.png");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(
            serde_json::to_string(&upload.metadata).unwrap(),
            r#"{"name":"ai-generated-image"}"#
        );
    }
}
