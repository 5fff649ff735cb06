//! Localized badge texts.

use crate::display::DisplayState;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Text shown for every rendered [`DisplayState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    pub synchronized: String,
    pub disconnected: String,
    pub wait: String,
    pub sending: String,
    /// Generic synchronization error
    pub sync_error: String,
    pub protocol_error: String,
    /// Action was reverted by the server because of an error.
    /// Shown for `undo-error`; generic sync errors use `sync_error`.
    pub error: String,
    /// Action was reverted because the user has no access
    pub denied: String,
}

impl Messages {
    pub fn en() -> Self {
        Self {
            synchronized: "Your data has been synchronized".into(),
            disconnected: "No Internet connection".into(),
            wait: "Data will be saved after you are online".into(),
            sending: "Saving your data".into(),
            sync_error: "Synchronization error".into(),
            protocol_error: "Refresh page to get latest updates".into(),
            error: "The action was cancelled because of error".into(),
            denied: "You have no access to this data".into(),
        }
    }

    pub fn ru() -> Self {
        Self {
            synchronized: "Ваши данные сохранены".into(),
            disconnected: "Нет интернета".into(),
            wait: "Данные сохранятся, когда появится интернет".into(),
            sending: "Сохраняю ваши данные".into(),
            sync_error: "Ошибка синхронизации".into(),
            protocol_error: "Обновите страницу, чтобы получить последние обновления".into(),
            error: "Действие было отменено из-за ошибки".into(),
            denied: "У вас нет доступа к этим данным".into(),
        }
    }

    /// Message for a rendered state. `None` and `Connecting` have no text.
    pub fn get(&self, state: DisplayState) -> Option<&str> {
        let text = match state {
            DisplayState::None | DisplayState::Connecting => return None,
            DisplayState::Synchronized => &self.synchronized,
            DisplayState::Disconnected => &self.disconnected,
            DisplayState::Wait => &self.wait,
            DisplayState::Sending => &self.sending,
            DisplayState::Error => &self.sync_error,
            DisplayState::ProtocolError => &self.protocol_error,
            DisplayState::UndoError => &self.error,
            DisplayState::UndoDenied => &self.denied,
        };
        Some(text.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for state in DisplayState::RENDERED {
            match self.get(state) {
                Some(text) if !text.trim().is_empty() => {}
                _ => return Err(ConfigError::MissingMessage(state)),
            }
        }
        Ok(())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::en()
    }
}
