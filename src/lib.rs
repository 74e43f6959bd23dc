pub mod clients;
pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod models;
pub mod server;

pub use clients::{HuggingFaceClient, InferenceBackend, PinataClient, PinningBackend};
pub use config::{Config, HuggingFaceConfig, PinataConfig, UploadLimit};
pub use error::{Result, RgenError};
pub use handler::{GenerationHandler, GenerationRequest};
pub use models::*;
