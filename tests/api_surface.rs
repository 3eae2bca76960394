// SPDX-License-Identifier: MIT OR Apache-2.0
//! API surface tests: compile-time guarantees that public items remain exported.
//!
//! If someone accidentally removes a `pub` item, these tests will fail to compile.

use serde_json::Value;

// ---------------------------------------------------------------------------
// errmap-core: public types
// ---------------------------------------------------------------------------

#[test]
fn core_factory_and_operations_accessible() {
    let utils: errmap_core::ErrorUtils = errmap_core::create_error_utils(
        errmap_core::ErrorMap::new(),
        errmap_core::ErrorUtilsOptions::default(),
    );
    let _map: &errmap_core::ErrorMap = utils.error_map();
    let _default: &str = utils.default_message();
    let _code: Option<String> = utils.get_error_code(&Value::Null);
    let _msg: Option<String> = utils.get_error(&Value::Null, None);
    let _has: bool = utils.has_error(&Value::Null, "X");
    let _builtin: &str = errmap_core::DEFAULT_ERROR_MESSAGE;
}

#[test]
fn core_extraction_items_accessible() {
    let _fields: [&str; 3] = errmap_core::CODE_FIELDS;
    let null = Value::Null;
    let _shape: errmap_core::ErrorShape<'_> = errmap_core::ErrorShape::classify(&null);
    let _falsy: bool = errmap_core::is_falsy(&Value::Null);
    let _norm: Option<String> = errmap_core::normalize_code(&Value::Null);
    let extractor = errmap_core::FieldPriorityExtractor;
    let _dyn: &dyn errmap_core::ExtractCode = &extractor;
}

#[test]
fn core_native_adapters_accessible() {
    let coded = errmap_core::CodedError::new("E", "m");
    let _v: Value = errmap_core::error_value(&coded);
}

// ---------------------------------------------------------------------------
// errmap-catalog: public types
// ---------------------------------------------------------------------------

#[test]
fn catalog_items_accessible() {
    let cat: errmap_catalog::ErrorCatalog = errmap_catalog::parse_toml("").unwrap();
    let _json = errmap_catalog::parse_json("{}").unwrap();
    let _warnings: Vec<errmap_catalog::CatalogWarning> =
        errmap_catalog::validate_catalog(&cat).unwrap();
    let merged = errmap_catalog::merge_catalogs(cat.clone(), cat);
    let _utils: errmap_core::ErrorUtils = merged.to_utils();
    let _schema: Value = errmap_catalog::catalog_schema();
    let _env: &str = errmap_catalog::DEFAULT_MESSAGE_ENV;
    let _err: Option<errmap_catalog::CatalogError> = None;
    let _load = errmap_catalog::load_catalog;
    let _apply = errmap_catalog::apply_env_overrides;
}
