pub mod inference_client;
pub mod pinning_client;
#[cfg(test)]
pub(crate) mod stub_server;
pub mod traits;

pub use inference_client::HuggingFaceClient;
pub use pinning_client::PinataClient;
pub use traits::{InferenceBackend, PinningBackend};
