use crate::display::DisplayState;
use thiserror::Error;

/// Error types for badge configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse badge options: {0}")]
    Parse(String),

    #[error("Unknown badge position: {0}")]
    UnknownPosition(String),

    #[error("Badge duration must be a positive number of milliseconds")]
    ZeroDuration,

    #[error("No message configured for the {0} state")]
    MissingMessage(DisplayState),

    #[error("No style configured for the {0} state")]
    MissingStyle(DisplayState),
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}
