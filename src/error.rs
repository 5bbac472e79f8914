use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("element `{0}` not found")]
    MissingElement(&'static str),
    #[error("2d drawing context unavailable")]
    MissingContext,
    #[error("browser call failed: {0}")]
    Js(String),
}

impl SiteError {
    /// Missing markup disables a feature without being an error worth reporting.
    pub fn is_absent(&self) -> bool {
        matches!(self, SiteError::MissingElement(_) | SiteError::MissingContext)
    }
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
