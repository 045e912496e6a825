//! Startup and configuration errors
//!
//! The frame step itself never fails; everything here happens before the
//! first frame is scheduled.

use core::fmt;

/// Faults while wiring the game into the page. None of these are recovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    NoWindow,
    NoDocument,
    MissingElement { id: String },
    WrongElementType { id: String, expected: &'static str },
    ContextUnavailable,
    Js { message: String },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::MissingElement { id } => write!(f, "missing element #{id}"),
            Self::WrongElementType { id, expected } => {
                write!(f, "element #{id} is not a {expected}")
            }
            Self::ContextUnavailable => write!(f, "2d canvas context unavailable"),
            Self::Js { message } => write!(f, "javascript error: {message}"),
        }
    }
}

impl std::error::Error for InitError {}

#[cfg(target_arch = "wasm32")]
impl From<InitError> for wasm_bindgen::JsValue {
    fn from(err: InitError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for InitError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js {
            message: value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        }
    }
}

/// A configuration block that could not be parsed
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    /// Parsed, but the values cannot make a playable game
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid game config: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid game config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
