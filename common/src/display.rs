use serde::{Deserialize, Serialize};
use std::fmt;

/// What the badge is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayState {
    /// Hidden
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "synchronized")]
    Synchronized,
    #[serde(rename = "disconnected")]
    Disconnected,
    #[serde(rename = "wait")]
    Wait,
    /// Reconnect in progress; the badge keeps its previous content
    #[serde(rename = "connecting")]
    Connecting,
    #[serde(rename = "sending")]
    Sending,
    /// Generic synchronization error
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "protocolError")]
    ProtocolError,
    #[serde(rename = "undo-error")]
    UndoError,
    #[serde(rename = "undo-denied")]
    UndoDenied,
}

impl DisplayState {
    /// States that put a message on screen
    pub const RENDERED: [DisplayState; 8] = [
        DisplayState::Synchronized,
        DisplayState::Disconnected,
        DisplayState::Wait,
        DisplayState::Sending,
        DisplayState::Error,
        DisplayState::ProtocolError,
        DisplayState::UndoError,
        DisplayState::UndoDenied,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayState::None => "none",
            DisplayState::Synchronized => "synchronized",
            DisplayState::Disconnected => "disconnected",
            DisplayState::Wait => "wait",
            DisplayState::Connecting => "connecting",
            DisplayState::Sending => "sending",
            DisplayState::Error => "error",
            DisplayState::ProtocolError => "protocolError",
            DisplayState::UndoError => "undo-error",
            DisplayState::UndoDenied => "undo-denied",
        }
    }

    /// Error-like states use the generic error style when they have none
    /// of their own, and are never hidden by a timer.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            DisplayState::Error
                | DisplayState::ProtocolError
                | DisplayState::UndoError
                | DisplayState::UndoDenied
        )
    }

    pub fn is_rendered(&self) -> bool {
        !matches!(self, DisplayState::None | DisplayState::Connecting)
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
