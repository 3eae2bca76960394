// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error message catalogs for errmap.
//!
//! An [`ErrorCatalog`] is the on-disk form of an error mapping: a table of
//! code → message entries plus an optional instance-level default message.
//! This crate loads catalogs from TOML or JSON, merges overlays, produces
//! advisory [`CatalogWarning`]s, and turns a catalog into a ready
//! [`ErrorUtils`].
//!
//! ```toml
//! default_message = "Something went wrong"
//!
//! [messages]
//! SAMPLE_ERROR = "Sample error message"
//! "404" = "Not found"
//! ```
#![deny(unsafe_code)]
#![warn(missing_docs)]

use errmap_core::{ErrorMap, ErrorUtils, ErrorUtilsOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Environment variable that overrides the catalog's default message.
pub const DEFAULT_MESSAGE_ENV: &str = "ERRMAP_DEFAULT_MESSAGE";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The requested catalog file was not found or could not be read.
    #[error("catalog file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed.
    #[error("failed to parse catalog: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("catalog validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory issues that do not prevent use of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// A code maps to an empty message and will always resolve to the default.
    EmptyMessage {
        /// The affected code.
        code: String,
    },
    /// `default_message` is set but blank, so the built-in default is used.
    BlankDefaultMessage,
    /// The catalog has no entries; every error resolves to the default.
    NoMessages,
}

impl std::fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogWarning::EmptyMessage { code } => {
                write!(f, "code '{code}' has an empty message and will use the default")
            }
            CatalogWarning::BlankDefaultMessage => {
                f.write_str("default_message is blank; the built-in default will be used")
            }
            CatalogWarning::NoMessages => {
                f.write_str("catalog has no messages; every error resolves to the default")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A serializable error mapping plus its instance-level default.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorCatalog {
    /// Message used for unmatched codes instead of the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_message: Option<String>,

    /// Code → display message entries.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

impl ErrorCatalog {
    /// Build [`ErrorUtils`] from a borrowed catalog.
    pub fn to_utils(&self) -> ErrorUtils {
        self.clone().into_utils()
    }

    /// Build [`ErrorUtils`] from this catalog.
    pub fn into_utils(self) -> ErrorUtils {
        let mut options = ErrorUtilsOptions::new();
        if let Some(message) = self.default_message {
            options = options.with_default_message(message);
        }
        ErrorUtils::with_options(ErrorMap::from(self.messages), options)
    }
}

impl From<ErrorCatalog> for ErrorUtils {
    fn from(catalog: ErrorCatalog) -> Self {
        catalog.into_utils()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load an [`ErrorCatalog`] from an optional file path.
///
/// * `.json` files are parsed as JSON, anything else as TOML.
/// * If `path` is `None`, returns an empty catalog.
///
/// Environment overrides are applied on top in both cases.
pub fn load_catalog(path: Option<&Path>) -> Result<ErrorCatalog, CatalogError> {
    let mut catalog = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| CatalogError::FileNotFound {
                path: p.display().to_string(),
            })?;
            let is_json = p
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            let catalog = if is_json {
                parse_json(&content)?
            } else {
                parse_toml(&content)?
            };
            tracing::debug!(
                path = %p.display(),
                entries = catalog.messages.len(),
                "loaded error catalog"
            );
            catalog
        }
        None => ErrorCatalog::default(),
    };
    apply_env_overrides(&mut catalog);
    Ok(catalog)
}

/// Parse a TOML string into an [`ErrorCatalog`].
pub fn parse_toml(content: &str) -> Result<ErrorCatalog, CatalogError> {
    toml::from_str::<ErrorCatalog>(content).map_err(|e| CatalogError::ParseError {
        reason: e.to_string(),
    })
}

/// Parse a JSON string into an [`ErrorCatalog`].
pub fn parse_json(content: &str) -> Result<ErrorCatalog, CatalogError> {
    serde_json::from_str::<ErrorCatalog>(content).map_err(|e| CatalogError::ParseError {
        reason: e.to_string(),
    })
}

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `ERRMAP_DEFAULT_MESSAGE`
pub fn apply_env_overrides(catalog: &mut ErrorCatalog) {
    if let Ok(val) = std::env::var(DEFAULT_MESSAGE_ENV) {
        tracing::debug!(var = DEFAULT_MESSAGE_ENV, "default message overridden from env");
        catalog.default_message = Some(val);
    }
}

/// JSON Schema describing the catalog file format.
pub fn catalog_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(ErrorCatalog)).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a catalog, returning advisory warnings.
///
/// Codes that can never match (empty, or padded with whitespace) are hard
/// errors reported as [`CatalogError::ValidationError`].
pub fn validate_catalog(catalog: &ErrorCatalog) -> Result<Vec<CatalogWarning>, CatalogError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<CatalogWarning> = Vec::new();

    for (code, message) in &catalog.messages {
        if code.is_empty() {
            errors.push("error code must not be empty".into());
        } else if code.trim() != code {
            errors.push(format!("error code '{code}' has leading or trailing whitespace"));
        }
        if message.is_empty() {
            warnings.push(CatalogWarning::EmptyMessage { code: code.clone() });
        }
    }

    if catalog
        .default_message
        .as_deref()
        .is_some_and(|m| m.trim().is_empty())
    {
        warnings.push(CatalogWarning::BlankDefaultMessage);
    }
    if catalog.messages.is_empty() {
        warnings.push(CatalogWarning::NoMessages);
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(CatalogError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two catalogs. Values in `overlay` take precedence over `base`.
///
/// Message tables are combined; on code collisions the overlay entry wins.
pub fn merge_catalogs(base: ErrorCatalog, overlay: ErrorCatalog) -> ErrorCatalog {
    let mut messages = base.messages;
    messages.extend(overlay.messages);
    ErrorCatalog {
        default_message: overlay.default_message.or(base.default_message),
        messages,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
