use thiserror::Error;

/// Process-level failures. All of them end the run with a generic failure
/// exit code; a rejected delivery is not one of them.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] marketbrief_core::ConfigError),

    #[error("invalid reference data: {0}")]
    Reference(#[from] marketbrief_core::ValidationError),

    #[error(transparent)]
    Fetch(#[from] marketbrief_core::FetchError),

    #[error(transparent)]
    Delivery(#[from] marketbrief_core::DeliveryError),
}
