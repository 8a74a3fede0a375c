use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarqueeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Backend rejected {operation}: {message}")]
    Backend { operation: String, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Generative model error: {0}")]
    AiResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MarqueeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        MarqueeError::InvalidArgument(message.into())
    }
}

impl From<toml::de::Error> for MarqueeError {
    fn from(err: toml::de::Error) -> Self {
        MarqueeError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for MarqueeError {
    fn from(err: toml::ser::Error) -> Self {
        MarqueeError::Serialization(format!("TOML serialization error: {}", err))
    }
}

impl From<serde_json::Error> for MarqueeError {
    fn from(err: serde_json::Error) -> Self {
        MarqueeError::Serialization(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
