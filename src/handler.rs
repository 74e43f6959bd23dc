use std::sync::Arc;

use uuid::Uuid;

use crate::{
    clients::{HuggingFaceClient, InferenceBackend, PinataClient, PinningBackend},
    config::Config,
    error::{Result, RgenError},
    models::{
        extract_prompt, ErrorResponse, FileUpload, GeneratedImage, GenerationResponse,
        HandlerResponse, PinnedResult, GENERATION_FAILED, METHOD_NOT_ALLOWED, MISSING_SECRETS,
        PROMPT_REQUIRED,
    },
};

/// Method and raw body of an incoming generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub method: String,
    pub body: Vec<u8>,
}

impl GenerationRequest {
    pub fn new(method: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: method.into(),
            body: body.into(),
        }
    }

    pub fn post_json(body: &serde_json::Value) -> Self {
        Self::new("POST", body.to_string())
    }
}

struct Credentials<'a> {
    api_key: &'a str,
    jwt: &'a str,
}

/// Turns a prompt into a pinned image: one inference call followed by one
/// pinning call. Holds no per-request state, so a single instance serves
/// every request.
#[derive(Clone)]
pub struct GenerationHandler {
    config: Config,
    inference: Arc<dyn InferenceBackend>,
    pinning: Arc<dyn PinningBackend>,
}

impl GenerationHandler {
    pub fn new(
        config: Config,
        inference: Arc<dyn InferenceBackend>,
        pinning: Arc<dyn PinningBackend>,
    ) -> Self {
        Self {
            config,
            inference,
            pinning,
        }
    }

    /// Wires the HuggingFace and Pinata HTTP clients from `config`.
    pub fn from_config(config: Config) -> Self {
        let inference = Arc::new(HuggingFaceClient::new(&config.huggingface));
        let pinning = Arc::new(PinataClient::new(&config.pinata));
        Self::new(config, inference, pinning)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn model(&self) -> &str {
        self.inference.model()
    }

    pub async fn handle(&self, request: GenerationRequest) -> HandlerResponse {
        let request_id = Uuid::new_v4();

        if request.method != "POST" {
            log::warn!("[req:{}] Rejected {} request", request_id, request.method);
            return HandlerResponse::error(405, ErrorResponse::new(METHOD_NOT_ALLOWED));
        }

        let prompt = match extract_prompt(&request.body) {
            Ok(Some(prompt)) => prompt,
            Ok(None) => {
                log::warn!("[req:{}] Request without prompt", request_id);
                return HandlerResponse::error(400, ErrorResponse::new(PROMPT_REQUIRED));
            }
            Err(e) => return Self::failure(request_id, e),
        };

        let credentials = match self.credentials() {
            Some(credentials) => credentials,
            None => {
                let missing = self.config.missing_secrets().join(", ");
                log::error!("[req:{}] Missing configuration: {}", request_id, missing);
                let error =
                    ErrorResponse::new(MISSING_SECRETS).with_details(format!("{} not set", missing));
                return HandlerResponse::error(500, error);
            }
        };

        log::info!(
            "[req:{}] Generating image for prompt ({} chars)",
            request_id,
            prompt.chars().count()
        );

        match self.generate_and_pin(&prompt, &credentials).await {
            Ok(pinned) => {
                log::info!("[req:{}] Pinned {}", request_id, pinned.content_address);
                HandlerResponse::ok(GenerationResponse::new(prompt, pinned))
            }
            Err(e) => Self::failure(request_id, e),
        }
    }

    fn credentials(&self) -> Option<Credentials<'_>> {
        let api_key = self.config.huggingface.api_key.as_deref()?;
        let jwt = self.config.pinata.jwt.as_deref()?;
        Some(Credentials { api_key, jwt })
    }

    async fn generate_and_pin(
        &self,
        prompt: &str,
        credentials: &Credentials<'_>,
    ) -> Result<PinnedResult> {
        let response = self.inference.generate(credentials.api_key, prompt).await?;
        let image = GeneratedImage::from_upstream(response)?;
        log::debug!(
            "Received {} byte {} image",
            image.bytes.len(),
            image.content_type
        );

        let pinned = self
            .pinning
            .pin_file(credentials.jwt, FileUpload::generated_image(image.bytes))
            .await?;

        if pinned.ipfs_hash.is_empty() {
            return Err(RgenError::ResponseError(
                "Pinata response did not include an IpfsHash".into(),
            ));
        }

        Ok(PinnedResult::new(
            pinned.ipfs_hash,
            &self.config.pinata.gateway_url,
        ))
    }

    fn failure(request_id: Uuid, error: RgenError) -> HandlerResponse {
        log::error!("[req:{}] {}: {}", request_id, GENERATION_FAILED, error);
        HandlerResponse::error(
            500,
            ErrorResponse::new(GENERATION_FAILED).with_details(error.to_string()),
        )
    }
}
