// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error-code extraction: shape classification and the pluggable extractor.

use serde_json::{Map, Value};
use std::fmt;

/// Record fields inspected for a code, highest priority first.
///
/// `code` is most likely to be set deliberately, `error` next, and `message`
/// is the common fallback carried by almost every error value.
pub const CODE_FIELDS: [&str; 3] = ["code", "error", "message"];

// ---------------------------------------------------------------------------
// Truthiness
// ---------------------------------------------------------------------------

/// Returns `true` when `value` counts as "no error at all".
///
/// `null`, `false`, numeric zero and the empty string are falsy. Every object
/// and array is truthy, even when empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Normalize a truthy field value into its string code.
///
/// Returns `None` for falsy values so callers can move on to the next field.
/// Integral floats render without a fraction (`404.0` → `"404"`), and arrays
/// join their rendered elements with `,` (`["E1", 2]` → `"E1,2"`, `null`
/// elements render empty). Objects have no natural code; their compact JSON
/// text is used verbatim so the lookup stays deterministic.
pub fn normalize_code(value: &Value) -> Option<String> {
    if is_falsy(value) {
        return None;
    }
    Some(render_code(value))
}

/// Max magnitude below which every integral `f64` is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn render_code(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(render_code).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// ErrorShape
// ---------------------------------------------------------------------------

/// The closed set of error-value shapes the built-in extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorShape<'a> {
    /// A falsy value: there is no error.
    Absent,
    /// A non-empty string used directly as the code.
    BareCode(&'a str),
    /// A JSON object that may carry `code`, `error` or `message`.
    Record(&'a Map<String, Value>),
    /// Anything else (truthy numbers, `true`, arrays).
    Unrecognized,
}

impl<'a> ErrorShape<'a> {
    /// Classify an error-like value.
    pub fn classify(value: &'a Value) -> Self {
        if is_falsy(value) {
            return Self::Absent;
        }
        match value {
            Value::String(s) => Self::BareCode(s),
            Value::Object(map) => Self::Record(map),
            _ => Self::Unrecognized,
        }
    }

    /// Short lowercase label, used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::BareCode(_) => "bare_code",
            Self::Record(_) => "record",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ErrorShape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ExtractCode
// ---------------------------------------------------------------------------

/// Strategy for pulling an error code out of an error-like value.
///
/// Implementations must be total: malformed or unexpected input yields
/// `None`, never a panic. Any `Fn(&Value) -> Option<String>` closure that is
/// `Send + Sync` implements this trait.
pub trait ExtractCode: Send + Sync {
    /// Extract the code, or `None` when the value carries no usable code.
    fn extract_code(&self, error: &Value) -> Option<String>;
}

impl<F> ExtractCode for F
where
    F: Fn(&Value) -> Option<String> + Send + Sync,
{
    fn extract_code(&self, error: &Value) -> Option<String> {
        self(error)
    }
}

/// The built-in extractor.
///
/// Bare strings are returned unchanged; records yield the first truthy field
/// of [`CODE_FIELDS`]; every other shape yields `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldPriorityExtractor;

impl ExtractCode for FieldPriorityExtractor {
    fn extract_code(&self, error: &Value) -> Option<String> {
        match ErrorShape::classify(error) {
            ErrorShape::BareCode(code) => Some(code.to_owned()),
            ErrorShape::Record(map) => CODE_FIELDS
                .iter()
                .find_map(|field| map.get(*field).and_then(normalize_code)),
            ErrorShape::Absent | ErrorShape::Unrecognized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_falsy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!(-3.5), json!("x"), json!({}), json!([])] {
            assert!(!is_falsy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn classify_each_shape() {
        assert_eq!(ErrorShape::classify(&json!(null)), ErrorShape::Absent);
        assert_eq!(ErrorShape::classify(&json!("")), ErrorShape::Absent);
        assert_eq!(ErrorShape::classify(&json!("E1")), ErrorShape::BareCode("E1"));
        assert!(matches!(
            ErrorShape::classify(&json!({"code": "E1"})),
            ErrorShape::Record(_)
        ));
        assert_eq!(ErrorShape::classify(&json!(42)), ErrorShape::Unrecognized);
        assert_eq!(ErrorShape::classify(&json!(["E1"])), ErrorShape::Unrecognized);
    }

    #[test]
    fn shape_display() {
        assert_eq!(ErrorShape::Absent.to_string(), "absent");
        assert_eq!(ErrorShape::BareCode("x").to_string(), "bare_code");
        assert_eq!(ErrorShape::Unrecognized.to_string(), "unrecognized");
    }

    #[test]
    fn normalize_scalars() {
        assert_eq!(normalize_code(&json!("E")).as_deref(), Some("E"));
        assert_eq!(normalize_code(&json!(404)).as_deref(), Some("404"));
        assert_eq!(normalize_code(&json!(1.5)).as_deref(), Some("1.5"));
        assert_eq!(normalize_code(&json!(true)).as_deref(), Some("true"));
        assert_eq!(normalize_code(&json!(0)), None);
        assert_eq!(normalize_code(&json!("")), None);
    }

    #[test]
    fn normalize_integral_floats_drop_fraction() {
        assert_eq!(normalize_code(&json!(404.0)).as_deref(), Some("404"));
        assert_eq!(normalize_code(&json!(-12.0)).as_deref(), Some("-12"));
        assert_eq!(normalize_code(&json!(404.5)).as_deref(), Some("404.5"));
        assert_eq!(normalize_code(&json!(1e300)).as_deref(), Some("1e300"));
    }

    #[test]
    fn normalize_arrays_join_elements() {
        assert_eq!(normalize_code(&json!(["E1"])).as_deref(), Some("E1"));
        assert_eq!(normalize_code(&json!(["E1", 2, null])).as_deref(), Some("E1,2,"));
        assert_eq!(normalize_code(&json!([["a", "b"], 3.0])).as_deref(), Some("a,b,3"));
        assert_eq!(normalize_code(&json!([])).as_deref(), Some(""));
    }

    #[test]
    fn normalize_nested_uses_compact_json() {
        assert_eq!(
            normalize_code(&json!({"a": 1})).as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn field_priority_order() {
        let e = FieldPriorityExtractor;
        let all = json!({"code": "C", "error": "E", "message": "M"});
        assert_eq!(e.extract_code(&all).as_deref(), Some("C"));
        let no_code = json!({"error": "E", "message": "M"});
        assert_eq!(e.extract_code(&no_code).as_deref(), Some("E"));
        let only_message = json!({"message": "M"});
        assert_eq!(e.extract_code(&only_message).as_deref(), Some("M"));
    }

    #[test]
    fn falsy_fields_are_skipped() {
        let e = FieldPriorityExtractor;
        let v = json!({"code": "", "error": 0, "message": "M"});
        assert_eq!(e.extract_code(&v).as_deref(), Some("M"));
        let none = json!({"code": null, "error": false, "message": ""});
        assert_eq!(e.extract_code(&none), None);
    }

    #[test]
    fn unrelated_fields_yield_none() {
        let e = FieldPriorityExtractor;
        assert_eq!(e.extract_code(&json!({"invalid": "X"})), None);
        assert_eq!(e.extract_code(&json!({})), None);
    }

    #[test]
    fn closures_are_extractors() {
        let custom = |v: &Value| v.get("custom").and_then(Value::as_str).map(str::to_owned);
        assert_eq!(
            custom.extract_code(&json!({"custom": "X"})).as_deref(),
            Some("X")
        );
        assert_eq!(custom.extract_code(&json!("X")), None);
    }
}
