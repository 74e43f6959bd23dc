use thiserror::Error;

#[derive(Debug, Error)]
pub enum RgenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("HuggingFace error: {0}")]
    GenerationError(String),
    #[error("Pinata error: {0}")]
    PinningError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, RgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_upstream_text() {
        let err = RgenError::GenerationError("model loading".into());
        assert_eq!(err.to_string(), "HuggingFace error: model loading");
    }
}
