use crate::{
    clients::traits::PinningBackend,
    config::{PinataConfig, UploadLimit},
    error::{Result, RgenError},
    logger,
    models::{FileUpload, PinResponse},
};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};

#[derive(Clone)]
pub struct PinataClient {
    client: Client,
    endpoint: String,
    upload_limit: UploadLimit,
}

impl PinataClient {
    pub fn new(config: &PinataConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &PinataConfig) -> Self {
        Self {
            client,
            endpoint: config.pin_file_endpoint(),
            upload_limit: config.upload_limit,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(&self, upload: FileUpload) -> Result<Form> {
        if !self.upload_limit.allows(upload.bytes.len()) {
            return Err(RgenError::PinningError(format!(
                "Upload of {} bytes exceeds the configured limit of {}",
                upload.bytes.len(),
                self.upload_limit
            )));
        }

        let metadata = serde_json::to_string(&upload.metadata)
            .map_err(|e| RgenError::SerializationError(e.to_string()))?;

        let file = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| RgenError::PinningError(format!("Invalid upload content type: {}", e)))?;

        Ok(Form::new()
            .part("file", file)
            .text("pinataMetadata", metadata))
    }
}

#[async_trait]
impl PinningBackend for PinataClient {
    async fn pin_file(&self, jwt: &str, upload: FileUpload) -> Result<PinResponse> {
        let size = upload.bytes.len();
        let form = self.build_form(upload)?;
        let _timer = logger::timer("pinata upload");

        log::info!("Pinning {} bytes to IPFS", size);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RgenError::RequestError(format!("Pinata request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = match response.text().await {
                Ok(text) => text,
                Err(e) => format!("<failed to read response body: {}>", e),
            };
            return Err(RgenError::PinningError(format!(
                "Request failed with status code {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let pinned: PinResponse = response
            .json()
            .await
            .map_err(|e| RgenError::ResponseError(format!("Unexpected Pinata response: {}", e)))?;

        log::debug!(
            "Pinned {} ({} bytes)",
            pinned.ipfs_hash,
            pinned.pin_size.unwrap_or(size as u64)
        );

        Ok(pinned)
    }
}
