use crate::{
    error::Result,
    models::{FileUpload, PinResponse, UpstreamResponse},
};
use async_trait::async_trait;

#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Runs the model on `prompt`. Any response that arrives is returned as
    /// is, including non-2xx ones; `Err` means the call never completed.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<UpstreamResponse>;

    fn model(&self) -> &str;
}

#[async_trait]
pub trait PinningBackend: Send + Sync {
    async fn pin_file(&self, jwt: &str, upload: FileUpload) -> Result<PinResponse>;
}
