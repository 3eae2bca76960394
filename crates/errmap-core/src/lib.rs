// SPDX-License-Identifier: MIT OR Apache-2.0
//! Normalize heterogeneous error values into stable codes and display messages.
//!
//! An error may arrive as a bare code string, or as an object exposing a
//! `code`, `error` or `message` field. [`create_error_utils`] binds an
//! [`ErrorMap`] and optional overrides into an [`ErrorUtils`] that extracts
//! the code, resolves a human-readable message, and checks for a specific
//! code, all without ever failing.
//!
//! ```
//! use errmap_core::{create_error_utils, ErrorMap, ErrorUtilsOptions, DEFAULT_ERROR_MESSAGE};
//! use serde_json::json;
//!
//! let utils = create_error_utils(
//!     ErrorMap::from([("SAMPLE_ERROR", "Sample error message")]),
//!     ErrorUtilsOptions::default(),
//! );
//!
//! let err = json!({ "message": "SAMPLE_ERROR" });
//! assert_eq!(utils.get_error(&err, None).as_deref(), Some("Sample error message"));
//! assert_eq!(
//!     utils.get_error(&json!({ "message": "UNKNOWN" }), None).as_deref(),
//!     Some(DEFAULT_ERROR_MESSAGE)
//! );
//! assert!(utils.has_error(&err, "SAMPLE_ERROR"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod map;
mod native;

pub use extract::{
    CODE_FIELDS, ErrorShape, ExtractCode, FieldPriorityExtractor, is_falsy, normalize_code,
};
pub use map::ErrorMap;
pub use native::{CodedError, error_value};

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Message used when no code matches and no other default was configured.
pub const DEFAULT_ERROR_MESSAGE: &str = "An unknown error occurred";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Construction-time overrides for [`create_error_utils`].
#[derive(Clone, Default)]
pub struct ErrorUtilsOptions {
    /// Replaces [`DEFAULT_ERROR_MESSAGE`] as the instance-level fallback.
    pub default_message: Option<String>,
    /// Replaces the built-in extractor for every bound operation.
    pub get_error_code: Option<Arc<dyn ExtractCode>>,
}

impl ErrorUtilsOptions {
    /// Options with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the instance-level default message.
    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }

    /// Replace the code extractor.
    pub fn with_extractor(mut self, extractor: impl ExtractCode + 'static) -> Self {
        self.get_error_code = Some(Arc::new(extractor));
        self
    }
}

impl fmt::Debug for ErrorUtilsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorUtilsOptions")
            .field("default_message", &self.default_message)
            .field("get_error_code", &self.get_error_code.as_ref().map(|_| "custom"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ErrorUtils
// ---------------------------------------------------------------------------

/// A bound set of error operations over a fixed mapping.
///
/// Immutable after construction. Cloning is cheap and clones share the same
/// mapping and extractor, so an instance can be handed to other threads
/// freely.
#[derive(Clone)]
pub struct ErrorUtils {
    error_map: Arc<ErrorMap>,
    default_message: String,
    extractor: Arc<dyn ExtractCode>,
    custom_extractor: bool,
}

/// Bind `mapping` and `options` into an [`ErrorUtils`].
///
/// Never fails: an empty mapping and default options are valid, and an empty
/// `default_message` falls through to [`DEFAULT_ERROR_MESSAGE`].
pub fn create_error_utils(mapping: impl Into<ErrorMap>, options: ErrorUtilsOptions) -> ErrorUtils {
    let ErrorUtilsOptions {
        default_message,
        get_error_code,
    } = options;

    let default_message = default_message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned());
    let custom_extractor = get_error_code.is_some();
    let extractor: Arc<dyn ExtractCode> = match get_error_code {
        Some(custom) => custom,
        None => Arc::new(FieldPriorityExtractor),
    };

    ErrorUtils {
        error_map: Arc::new(mapping.into()),
        default_message,
        extractor,
        custom_extractor,
    }
}

impl ErrorUtils {
    /// Utilities over `mapping` with no overrides.
    pub fn new(mapping: impl Into<ErrorMap>) -> Self {
        create_error_utils(mapping, ErrorUtilsOptions::default())
    }

    /// Utilities over `mapping` with the given overrides.
    pub fn with_options(mapping: impl Into<ErrorMap>, options: ErrorUtilsOptions) -> Self {
        create_error_utils(mapping, options)
    }

    /// The configured mapping.
    pub fn error_map(&self) -> &ErrorMap {
        &self.error_map
    }

    /// The instance-level default message after resolution.
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Whether a caller-supplied extractor replaced the built-in one.
    pub fn has_custom_extractor(&self) -> bool {
        self.custom_extractor
    }

    /// Extract the error code from `error`, or `None` when there is none.
    pub fn get_error_code(&self, error: &Value) -> Option<String> {
        self.extractor.extract_code(error)
    }

    /// Resolve a display message for `error`.
    ///
    /// Returns `None` for falsy input. Otherwise a mapped message wins; when
    /// no code is found (an empty code counts as none), or the code is
    /// unmapped, the fallback is
    /// `default_message` if given and non-empty, then the instance default.
    pub fn get_error(&self, error: &Value, default_message: Option<&str>) -> Option<String> {
        if is_falsy(error) {
            return None;
        }

        let fallback = default_message
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_message.as_str());

        let Some(code) = self.get_error_code(error).filter(|c| !c.is_empty()) else {
            tracing::trace!(
                shape = %ErrorShape::classify(error),
                custom_extractor = self.custom_extractor,
                "no error code extracted; using default message"
            );
            return Some(fallback.to_owned());
        };

        match self.error_map.get(&code) {
            Some(message) if !message.is_empty() => Some(message.to_owned()),
            _ => {
                tracing::trace!(%code, "error code not mapped; using default message");
                Some(fallback.to_owned())
            }
        }
    }

    /// Whether the code extracted from `error` equals `target`.
    ///
    /// An empty extracted code never matches.
    ///
    /// Both sides are compared in string form, so a numeric code matches its
    /// decimal rendering: `{"code": 404}` has error `"404"` and `404`.
    pub fn has_error(&self, error: &Value, target: impl fmt::Display) -> bool {
        if is_falsy(error) {
            return false;
        }
        self.get_error_code(error)
            .filter(|code| !code.is_empty())
            .is_some_and(|code| code == target.to_string())
    }

    /// [`get_error`](Self::get_error) for a Rust error, via [`error_value`].
    pub fn get_error_for(
        &self,
        err: &(dyn std::error::Error + 'static),
        default_message: Option<&str>,
    ) -> Option<String> {
        self.get_error(&error_value(err), default_message)
    }

    /// [`get_error_code`](Self::get_error_code) for a Rust error.
    pub fn get_error_code_for(
        &self,
        err: &(dyn std::error::Error + 'static),
    ) -> Option<String> {
        self.get_error_code(&error_value(err))
    }

    /// [`has_error`](Self::has_error) for a Rust error.
    pub fn has_error_for(
        &self,
        err: &(dyn std::error::Error + 'static),
        target: impl fmt::Display,
    ) -> bool {
        self.has_error(&error_value(err), target)
    }
}

impl Default for ErrorUtils {
    fn default() -> Self {
        Self::new(ErrorMap::new())
    }
}

impl fmt::Debug for ErrorUtils {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorUtils")
            .field("error_map", &self.error_map)
            .field("default_message", &self.default_message)
            .field("custom_extractor", &self.custom_extractor)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
