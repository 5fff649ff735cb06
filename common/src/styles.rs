//! Inline style presets for the badge element.

use crate::display::DisplayState;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CSS declarations keyed by property name (`background-image`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(property.into(), value.into());
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Styles for the badge structure and each state.
///
/// `base` goes on the outer element, `text` on the inner message cell.
/// Error-like states without their own entry use `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    pub base: Style,
    pub text: Style,
    /// Fallback for every error-like state, `undo-error` included.
    /// Unlike `Messages::error`, not tied to one state.
    pub error: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronized: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnected: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sending: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_error: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denied: Option<Style>,
}

const ICON_OK: &str = "url(\"data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='24' height='24'><path d='M5 12l5 5 9-10' fill='none' stroke='white' stroke-width='2'/></svg>\")";
const ICON_OFFLINE: &str = "url(\"data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='24' height='24'><circle cx='12' cy='12' r='9' fill='none' stroke='white' stroke-width='2'/><path d='M5 5l14 14' stroke='white' stroke-width='2'/></svg>\")";
const ICON_REFRESH: &str = "url(\"data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='24' height='24'><path d='M19 12a7 7 0 1 1-2-5M19 3v5h-5' fill='none' stroke='white' stroke-width='2'/></svg>\")";
const ICON_ERROR: &str = "url(\"data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='24' height='24'><path d='M12 5v9M12 17v2' stroke='white' stroke-width='2'/></svg>\")";

impl Styles {
    /// Dark rounded card with an icon on the left
    pub fn preset() -> Self {
        let state = |color: &str, icon: &str| {
            Style::new()
                .with("background-color", color)
                .with("background-image", icon)
        };

        Self {
            base: Style::new()
                .with("position", "fixed")
                .with("display", "none")
                .with("box-sizing", "border-box")
                .with("width", "260px")
                .with("height", "48px")
                .with("margin", "16px")
                .with("padding", "0 16px 0 48px")
                .with("border-radius", "6px")
                .with("background-repeat", "no-repeat")
                .with("background-position", "14px 50%")
                .with("color", "white")
                .with("font", "14px/1.2 system-ui, sans-serif")
                .with("z-index", "999"),
            text: Style::new()
                .with("display", "table-cell")
                .with("height", "48px")
                .with("vertical-align", "middle"),
            error: state("rgb(190, 40, 40)", ICON_ERROR),
            synchronized: Some(state("rgb(40, 130, 70)", ICON_OK)),
            disconnected: Some(state("rgb(30, 30, 30)", ICON_OFFLINE)),
            wait: Some(state("rgb(30, 30, 30)", ICON_OFFLINE)),
            sending: Some(state("rgb(30, 30, 30)", ICON_REFRESH)),
            sync_error: None,
            protocol_error: Some(state("rgb(200, 120, 20)", ICON_REFRESH)),
            denied: None,
        }
    }

    /// Style for a rendered state
    pub fn get(&self, state: DisplayState) -> Option<&Style> {
        let own = match state {
            DisplayState::None | DisplayState::Connecting => return None,
            DisplayState::Synchronized => self.synchronized.as_ref(),
            DisplayState::Disconnected => self.disconnected.as_ref(),
            DisplayState::Wait => self.wait.as_ref(),
            DisplayState::Sending => self.sending.as_ref(),
            DisplayState::Error => self.sync_error.as_ref(),
            DisplayState::ProtocolError => self.protocol_error.as_ref(),
            DisplayState::UndoError => Some(&self.error),
            DisplayState::UndoDenied => self.denied.as_ref(),
        };

        match own {
            Some(style) => Some(style),
            None if state.is_error() => Some(&self.error),
            None => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for state in DisplayState::RENDERED {
            if self.get(state).is_none() {
                return Err(ConfigError::MissingStyle(state));
            }
        }
        Ok(())
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::preset()
    }
}
