//! Schema validation tests for tiered-storage-config.
// crates/tiered-storage-config/tests/schema_validation.rs
// =============================================================================
// Module: Schema Validation Tests
// Description: Validate defaults, required keys, conversion, and checks.
// Purpose: Ensure validation fails fast with literal operator messages.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::Path;

use tiered_storage_config::Check;
use tiered_storage_config::ConfigError;
use tiered_storage_config::ConfigValue;
use tiered_storage_config::KeySpec;
use tiered_storage_config::RawConfig;
use tiered_storage_config::Schema;
use tiered_storage_config::SchemaError;
use tiered_storage_config::TypeRegistry;
use tiered_storage_config::ValidatedConfig;
use tiered_storage_config::ValueType;

type TestResult = Result<(), String>;

const COLORS: &[&str] = &["red", "green", "blue"];

fn sample_schema() -> Schema {
    Schema::builder(Some("demo"))
        .define(KeySpec::new("name", ValueType::String))
        .define(
            KeySpec::new("color", ValueType::String)
                .default_value(ConfigValue::String("red".to_string()))
                .check(Check::OneOf(COLORS)),
        )
        .define(KeySpec::new("plugin.class", ValueType::TypeName).optional())
        .define(
            KeySpec::new("big.size", ValueType::Int)
                .default_value(ConfigValue::Int(1 << 19))
                .check(Check::AtLeast(1)),
        )
        .define(
            KeySpec::new("small.size", ValueType::Int)
                .default_value(ConfigValue::Int(8_192))
                .check(Check::AtLeast(1)),
        )
        .define(KeySpec::new("enabled", ValueType::Boolean).default_value(ConfigValue::Boolean(false)))
        .define(KeySpec::new("secret", ValueType::Password))
        .build()
        .unwrap()
}

fn even_port(key: &str, value: &ConfigValue) -> Result<(), ConfigError> {
    match value {
        ConfigValue::Int(port) if port % 2 == 0 => Ok(()),
        _ => Err(ConfigError::invalid_with_reason(key, value.render(), "Port must be even")),
    }
}

fn minimal_raw() -> RawConfig {
    [("demo.name", "n"), ("demo.secret", "s")].into_iter().collect()
}

fn validate(raw: &RawConfig) -> Result<ValidatedConfig, ConfigError> {
    sample_schema().validate(raw, &TypeRegistry::empty())
}

fn assert_message(result: Result<ValidatedConfig, ConfigError>, expected: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message == expected {
                Ok(())
            } else {
                Err(format!("expected {expected:?}, got {message:?}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn minimal_config_applies_every_default() -> TestResult {
    let values = validate(&minimal_raw()).map_err(|err| err.to_string())?;
    assert_eq!(values.string("name"), Some("n"));
    assert_eq!(values.string("color"), Some("red"));
    assert_eq!(values.get("plugin.class"), Some(&ConfigValue::Null));
    assert_eq!(values.type_name("plugin.class"), None);
    assert_eq!(values.int("big.size"), Some(1 << 19));
    assert_eq!(values.int("small.size"), Some(8_192));
    assert_eq!(values.boolean("enabled"), Some(false));
    assert_eq!(values.password("secret").map(|secret| secret.value()), Some("s"));
    assert_eq!(values.len(), 7);
    Ok(())
}

#[test]
fn missing_required_key_reports_literal_message() -> TestResult {
    assert_message(
        validate(&RawConfig::new()),
        "Missing required configuration \"demo.name\" which has no default value.",
    )
}

#[test]
fn first_error_in_declaration_order_wins() -> TestResult {
    let mut raw = RawConfig::new();
    raw.insert("demo.color", "purple");
    raw.insert("demo.big.size", "zero");
    assert_message(
        validate(&raw),
        "Missing required configuration \"demo.name\" which has no default value.",
    )?;
    raw.insert("demo.name", "n");
    assert_message(validate(&raw), "Invalid value purple for configuration demo.color")
}

#[test]
fn enumeration_rejects_unknown_token_and_null() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert("demo.color", "test_string");
    assert_message(validate(&raw), "Invalid value test_string for configuration demo.color")?;
    raw.insert_null("demo.color");
    assert_message(validate(&raw), "Invalid value null for configuration demo.color")
}

#[test]
fn explicit_null_on_required_key_is_invalid() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert_null("demo.name");
    assert_message(validate(&raw), "Invalid value null for configuration demo.name")
}

#[test]
fn explicit_null_on_defaulted_key_is_not_replaced_by_default() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert_null("demo.small.size");
    assert_message(
        validate(&raw),
        "Invalid value null for configuration demo.small.size: Value must be non-null",
    )
}

#[test]
fn integer_conversion_failure_names_type() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert("demo.big.size", "1MB");
    assert_message(
        validate(&raw),
        "Invalid value 1MB for configuration demo.big.size: Not a number of type INT",
    )
}

#[test]
fn boolean_conversion_failure_names_expectation() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert("demo.enabled", "maybe");
    assert_message(
        validate(&raw),
        "Invalid value maybe for configuration demo.enabled: Expected value to be either true or false",
    )
}

#[test]
fn size_defaults_are_independent() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert("demo.small.size", "16384");
    let values = validate(&raw).map_err(|err| err.to_string())?;
    assert_eq!(values.int("small.size"), Some(16_384));
    assert_eq!(values.int("big.size"), Some(1 << 19));

    let mut raw = minimal_raw();
    raw.insert("demo.big.size", "1024");
    let values = validate(&raw).map_err(|err| err.to_string())?;
    assert_eq!(values.int("big.size"), Some(1_024));
    assert_eq!(values.int("small.size"), Some(8_192));
    Ok(())
}

#[test]
fn values_are_trimmed() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert("demo.name", "  padded  ");
    raw.insert("demo.big.size", " 42 ");
    let values = validate(&raw).map_err(|err| err.to_string())?;
    assert_eq!(values.string("name"), Some("padded"));
    assert_eq!(values.int("big.size"), Some(42));
    Ok(())
}

#[test]
fn undeclared_keys_are_ignored_and_reported() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert("demo.typo.size", "1");
    raw.insert("other.backend.key", "x");
    raw.insert("demonstration", "x");
    let values = validate(&raw).map_err(|err| err.to_string())?;
    assert_eq!(values.unknown_keys(), &["demo.typo.size".to_string()]);
    Ok(())
}

#[test]
fn unknown_type_name_is_reported_during_validation() -> TestResult {
    let mut raw = minimal_raw();
    raw.insert("demo.plugin.class", " invalid_provider ");
    assert_message(
        validate(&raw),
        "Invalid value invalid_provider for configuration demo.plugin.class: Class \
         invalid_provider could not be found.",
    )
}

#[test]
fn prefixless_schema_normalizes_paths() -> TestResult {
    let schema = Schema::builder(None)
        .define(KeySpec::new("root", ValueType::Path).check(Check::NonEmpty))
        .build()
        .map_err(|err| err.to_string())?;
    let raw: RawConfig = [("root", "./data//segments/")].into_iter().collect();
    let values = schema.validate(&raw, &TypeRegistry::empty()).map_err(|err| err.to_string())?;
    assert_eq!(values.path("root"), Some(Path::new("data/segments")));
    assert_eq!(values.qualified_key("root"), "root");

    let raw: RawConfig = [("root", "  ")].into_iter().collect();
    assert_message(
        schema.validate(&raw, &TypeRegistry::empty()),
        "Invalid value  for configuration root: String must be non-empty",
    )
}

#[test]
fn validation_is_repeatable() -> TestResult {
    let raw = minimal_raw();
    let first = validate(&raw).map_err(|err| err.to_string())?;
    let second = validate(&raw).map_err(|err| err.to_string())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn duplicate_keys_are_rejected_at_build() {
    let result = Schema::builder(Some("demo"))
        .define(KeySpec::new("name", ValueType::String))
        .define(KeySpec::new("name", ValueType::Int))
        .build();
    assert_eq!(result.unwrap_err(), SchemaError::DuplicateKey("demo.name".to_string()));
}

#[test]
fn invalid_defaults_are_rejected_at_build() {
    let result = Schema::builder(Some("demo"))
        .define(
            KeySpec::new("color", ValueType::String)
                .default_value(ConfigValue::String("mauve".to_string()))
                .check(Check::OneOf(COLORS)),
        )
        .build();
    assert_eq!(
        result.unwrap_err().to_string(),
        "Invalid default configuration value for demo.color: Invalid value mauve for \
         configuration demo.color"
    );

    let result = Schema::builder(None)
        .define(KeySpec::new("size", ValueType::Int).default_value(ConfigValue::Long(1)))
        .build();
    assert!(matches!(result, Err(SchemaError::InvalidDefault { .. })));
}

#[test]
fn custom_check_reports_its_own_reason() -> TestResult {
    let schema = Schema::builder(Some("demo"))
        .define(KeySpec::new("port", ValueType::Int).check(Check::Custom(even_port)))
        .define(KeySpec::new("name", ValueType::String))
        .build()
        .map_err(|err| err.to_string())?;
    let registry = TypeRegistry::empty();

    let raw: RawConfig = [("demo.port", "8081")].into_iter().collect();
    assert_message(
        schema.validate(&raw, &registry),
        "Invalid value 8081 for configuration demo.port: Port must be even",
    )?;

    let raw: RawConfig = [("demo.port", " 8080 "), ("demo.name", "n")].into_iter().collect();
    let values = schema.validate(&raw, &registry).map_err(|err| err.to_string())?;
    assert_eq!(values.int("port"), Some(8_080));
    Ok(())
}
