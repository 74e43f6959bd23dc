use crate::{
    clients::traits::InferenceBackend,
    config::HuggingFaceConfig,
    error::{Result, RgenError},
    logger,
    models::{InferencePayload, UpstreamResponse},
};
use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client,
};

#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    model: String,
    endpoint: String,
}

impl HuggingFaceClient {
    pub fn new(config: &HuggingFaceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &HuggingFaceConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            endpoint: config.endpoint(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceBackend for HuggingFaceClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<UpstreamResponse> {
        let payload = InferencePayload::new(prompt);
        let _timer = logger::timer("huggingface inference");

        log::info!("Generating image with model: {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(ACCEPT, "image/png")
            .json(&payload)
            .send()
            .await
            .map_err(|e| RgenError::RequestError(format!("HuggingFace request failed: {}", e)))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| RgenError::ResponseError(format!("Failed to read image body: {}", e)))?
            .to_vec();

        log::debug!(
            "HuggingFace responded {} ({}), {} bytes",
            status,
            content_type.as_deref().unwrap_or("no content-type"),
            body.len()
        );

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
