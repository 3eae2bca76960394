// SPDX-License-Identifier: MIT OR Apache-2.0
//! Adapters from Rust error types into error-like values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Represent a Rust error as an error-like value.
///
/// A [`CodedError`] keeps its explicit code. Any other error becomes
/// `{"message": err.to_string()}`, so the rendered message acts as the code.
pub fn error_value(err: &(dyn std::error::Error + 'static)) -> Value {
    if let Some(coded) = err.downcast_ref::<CodedError>() {
        return coded.to_value();
    }
    let mut map = Map::new();
    map.insert("message".into(), Value::String(err.to_string()));
    Value::Object(map)
}

/// An error that carries an explicit code next to its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodedError {
    /// Stable error code.
    pub code: String,
    /// Free-form detail, independent of the display mapping.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl CodedError {
    /// Create an error with the given code and detail message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The error as an error-like value (`code` takes priority on extraction).
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("code".into(), Value::String(self.code.clone()));
        if !self.message.is_empty() {
            map.insert("message".into(), Value::String(self.message.clone()));
        }
        Value::Object(map)
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.code)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

impl std::error::Error for CodedError {}

impl From<&CodedError> for Value {
    fn from(err: &CodedError) -> Self {
        err.to_value()
    }
}

impl From<CodedError> for Value {
    fn from(err: CodedError) -> Self {
        err.to_value()
    }
}
