//! Badge configuration and option parsing.

use crate::constants::DEFAULT_DURATION_MS;
use crate::error::ConfigError;
use crate::messages::Messages;
use crate::position::Position;
use crate::styles::Styles;
use serde::Deserialize;
use std::time::Duration;

/// Options as supplied by the host page, e.g. from a JSON document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BadgeOptions {
    pub messages: Messages,
    pub styles: Styles,
    #[serde(default)]
    pub position: Option<Position>,
    /// Milliseconds
    #[serde(default)]
    pub duration: Option<u64>,
}

/// Validated, immutable badge configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeConfig {
    pub messages: Messages,
    pub styles: Styles,
    pub position: Position,
    /// How long the synchronized message stays on screen
    pub duration: Duration,
}

impl BadgeConfig {
    pub fn new(messages: Messages, styles: Styles) -> Self {
        Self {
            messages,
            styles,
            position: Position::default(),
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: BadgeOptions = serde_json::from_str(json)?;
        Self::try_from(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        self.messages.validate()?;
        self.styles.validate()
    }
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self::new(Messages::en(), Styles::preset())
    }
}

impl TryFrom<BadgeOptions> for BadgeConfig {
    type Error = ConfigError;

    fn try_from(options: BadgeOptions) -> Result<Self, Self::Error> {
        let mut config = BadgeConfig::new(options.messages, options.styles);
        if let Some(position) = options.position {
            config.position = position;
        }
        if let Some(duration) = options.duration {
            config.duration = Duration::from_millis(duration);
        }
        config.validate()?;
        Ok(config)
    }
}
