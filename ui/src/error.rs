use syncbadge_core::ConfigError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Error types for mounting the badge in a browser
#[derive(Error, Debug, Clone)]
pub enum WebError {
    #[error("No window object available")]
    NoWindow,

    #[error("No document available")]
    NoDocument,

    #[error("Document has no body")]
    NoBody,

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("Invalid badge configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Dom(describe_js(&value))
    }
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
