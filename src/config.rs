use std::env;
use std::fmt;

use crate::error::{Result, RgenError};

pub const DEFAULT_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";
pub const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";
pub const DEFAULT_PINATA_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs/";
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 256 * 1024;

/// Cap on the size of the image body uploaded to the pinning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadLimit {
    #[default]
    Unlimited,
    Bytes(usize),
}

impl UploadLimit {
    /// Parses `unlimited` (or an empty value) and plain byte counts.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("unlimited") {
            return Ok(UploadLimit::Unlimited);
        }
        value.parse::<usize>().map(UploadLimit::Bytes).map_err(|_| {
            RgenError::ConfigError(format!("Invalid upload limit '{}'", value))
        })
    }

    pub fn allows(&self, len: usize) -> bool {
        match self {
            UploadLimit::Unlimited => true,
            UploadLimit::Bytes(max) => len <= *max,
        }
    }
}

impl fmt::Display for UploadLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadLimit::Unlimited => write!(f, "unlimited"),
            UploadLimit::Bytes(max) => write!(f, "{} bytes", max),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct PinataConfig {
    pub jwt: Option<String>,
    pub api_url: String,
    pub gateway_url: String,
    pub upload_limit: UploadLimit,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Largest inbound request body the server reads.
    pub max_request_bytes: usize,
    pub huggingface: HuggingFaceConfig,
    pub pinata: PinataConfig,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        HuggingFaceConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_HF_BASE_URL.to_string(),
        }
    }
}

impl HuggingFaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        HuggingFaceConfig {
            api_key: non_empty_var("HUGGINGFACE_API_KEY"),
            model: non_empty_var("HUGGINGFACE_MODEL").unwrap_or(defaults.model),
            base_url: non_empty_var("HUGGINGFACE_BASE_URL").unwrap_or(defaults.base_url),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

impl Default for PinataConfig {
    fn default() -> Self {
        PinataConfig {
            jwt: None,
            api_url: DEFAULT_PINATA_API_URL.to_string(),
            gateway_url: DEFAULT_PINATA_GATEWAY_URL.to_string(),
            upload_limit: UploadLimit::Unlimited,
        }
    }
}

impl PinataConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let upload_limit = match non_empty_var("PINATA_UPLOAD_LIMIT_BYTES") {
            Some(raw) => UploadLimit::parse(&raw)?,
            None => defaults.upload_limit,
        };

        Ok(PinataConfig {
            jwt: non_empty_var("PINATA_JWT"),
            api_url: non_empty_var("PINATA_API_URL").unwrap_or(defaults.api_url),
            gateway_url: non_empty_var("PINATA_GATEWAY_URL").unwrap_or(defaults.gateway_url),
            upload_limit,
        })
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_gateway_url(mut self, gateway_url: impl Into<String>) -> Self {
        self.gateway_url = gateway_url.into();
        self
    }

    pub fn with_upload_limit(mut self, upload_limit: UploadLimit) -> Self {
        self.upload_limit = upload_limit;
        self
    }

    pub fn pin_file_endpoint(&self) -> String {
        format!(
            "{}/pinning/pinFileToIPFS",
            self.api_url.trim_end_matches('/')
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            huggingface: HuggingFaceConfig::default(),
            pinata: PinataConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let port = match non_empty_var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| RgenError::ConfigError(format!("Invalid PORT '{}'", raw)))?,
            None => defaults.port,
        };
        let max_request_bytes = match non_empty_var("MAX_REQUEST_BYTES") {
            Some(raw) => raw.parse().map_err(|_| {
                RgenError::ConfigError(format!("Invalid MAX_REQUEST_BYTES '{}'", raw))
            })?,
            None => defaults.max_request_bytes,
        };

        Ok(Config {
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            port,
            max_request_bytes,
            huggingface: HuggingFaceConfig::from_env(),
            pinata: PinataConfig::from_env()?,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_request_bytes(mut self, max_request_bytes: usize) -> Self {
        self.max_request_bytes = max_request_bytes;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_huggingface(mut self, config: HuggingFaceConfig) -> Self {
        self.huggingface = config;
        self
    }

    pub fn with_pinata(mut self, config: PinataConfig) -> Self {
        self.pinata = config;
        self
    }

    /// Names of the secrets that are not configured, in env-var form.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.huggingface.api_key.is_none() {
            missing.push("HUGGINGFACE_API_KEY");
        }
        if self.pinata.jwt.is_none() {
            missing.push("PINATA_JWT");
        }
        missing
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
