use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SandboxError {
    #[error("container not found: {0}")]
    MissingContainer(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no global window")]
    NoWindow,

    #[error("DOM error: {0}")]
    Dom(String),
}

impl SandboxError {
    /// Wrap a thrown JS value (selector syntax errors, listener failures).
    pub fn from_js(value: JsValue) -> Self {
        SandboxError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SandboxError> for JsValue {
    fn from(err: SandboxError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
