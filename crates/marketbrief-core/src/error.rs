use thiserror::Error;

/// Validation errors for reference data and domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("comparison level '{label}' must be a finite positive price")]
    InvalidLevel { label: String },
}

/// Missing or unusable runtime configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnvVar(String),
    #[error("environment variable {0} is set but blank")]
    BlankEnvVar(String),
}

/// Failure of a mandatory lookup. Optional lookups never surface this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{provider} transport error: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },
    #[error("failed to decode {provider} response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl FetchError {
    pub fn transport(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            message: message.into(),
        }
    }

    pub fn decode(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            provider,
            message: message.into(),
        }
    }

    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Transport { provider, .. } | Self::Decode { provider, .. } => provider,
        }
    }
}

/// The messaging endpoint could not be reached at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("message delivery failed: {message}")]
pub struct DeliveryError {
    pub message: String,
}
