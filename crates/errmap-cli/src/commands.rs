// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command implementations for the errmap CLI.
//!
//! Kept free of process concerns (stdin, exit codes) so they can be tested
//! without spawning the binary.

use anyhow::{Context, Result};
use errmap_catalog::{CatalogError, ErrorCatalog, catalog_schema, validate_catalog};
use errmap_core::ErrorUtils;
use serde_json::Value;

/// Interpret a raw command-line payload as an error-like value.
///
/// Valid JSON is used as-is; anything else is treated as a bare code string.
pub fn parse_payload(raw: &str) -> Value {
    let trimmed = raw.trim();
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_owned()))
}

/// Render an optional string as a JSON value: a quoted string, or `null`
/// when absent, so a message that reads `null` stays distinguishable.
pub fn render(value: Option<String>) -> String {
    Value::from(value).to_string()
}

/// `errmap code`: the extracted code, or `null`.
pub fn code(utils: &ErrorUtils, payload: &Value) -> String {
    render(utils.get_error_code(payload))
}

/// `errmap message`: the resolved message, or `null`.
pub fn message(utils: &ErrorUtils, payload: &Value, default: Option<&str>) -> String {
    render(utils.get_error(payload, default))
}

/// `errmap has`: whether the payload carries `target`.
pub fn has(utils: &ErrorUtils, payload: &Value, target: &str) -> bool {
    utils.has_error(payload, target)
}

/// `errmap check`: validate the catalog and render its warnings.
pub fn check(catalog: &ErrorCatalog) -> Result<Vec<String>> {
    match validate_catalog(catalog) {
        Ok(warnings) => Ok(warnings.iter().map(ToString::to_string).collect()),
        Err(CatalogError::ValidationError { reasons }) => {
            anyhow::bail!("invalid catalog:\n  {}", reasons.join("\n  "))
        }
        Err(other) => Err(other.into()),
    }
}

/// `errmap schema`: the catalog JSON schema, pretty-printed.
pub fn schema_json() -> Result<String> {
    serde_json::to_string_pretty(&catalog_schema()).context("serialize schema")
}
