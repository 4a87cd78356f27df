//! Type registry and capability resolution tests for tiered-storage-config.
// crates/tiered-storage-config/tests/type_registry.rs
// =============================================================================
// Module: Type Registry Tests
// Description: Validate the three-stage capability resolution order.
// Purpose: Ensure unknown, mismatched, and non-constructible types fail closed.
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

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tiered_storage_config::Capability;
use tiered_storage_config::ConfigError;
use tiered_storage_config::Constructor;
use tiered_storage_config::KeySpec;
use tiered_storage_config::RawConfig;
use tiered_storage_config::RegistryError;
use tiered_storage_config::Schema;
use tiered_storage_config::SchemaError;
use tiered_storage_config::TypeDescriptor;
use tiered_storage_config::TypeRegistry;
use tiered_storage_config::ValueType;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
    fn serial(&self) -> usize;
}

trait Counter: Send + Sync {
    fn count(&self) -> usize;
}

struct GreeterCapability;

impl Capability for GreeterCapability {
    type Instance = dyn Greeter;
    const NAME: &'static str = "demo::Greeter";
}

struct CounterCapability;

impl Capability for CounterCapability {
    type Instance = dyn Counter;
    const NAME: &'static str = "demo::Counter";
}

static BUILT: AtomicUsize = AtomicUsize::new(0);

struct English {
    serial: usize,
}

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".to_string()
    }

    fn serial(&self) -> usize {
        self.serial
    }
}

struct Tally;

impl Counter for Tally {
    fn count(&self) -> usize {
        7
    }
}

fn new_english() -> Box<dyn Greeter> {
    Box::new(English {
        serial: BUILT.fetch_add(1, Ordering::SeqCst),
    })
}

fn new_tally() -> Box<dyn Counter> {
    Box::new(Tally)
}

fn registry() -> TypeRegistry {
    TypeRegistry::builder()
        .register(
            TypeDescriptor::new("demo::English")
                .implements::<GreeterCapability>(Constructor::NoArgs(new_english)),
        )
        .register(
            TypeDescriptor::new("demo::Formal")
                .implements::<GreeterCapability>(Constructor::WithArgs),
        )
        .register(
            TypeDescriptor::new("demo::Tally")
                .implements::<CounterCapability>(Constructor::NoArgs(new_tally)),
        )
        .register(TypeDescriptor::new("std::vec::Vec"))
        .build()
        .unwrap()
}

const KEY: &str = "demo.greeter.class";

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn absent_type_name_resolves_to_none() {
    let resolved = registry().resolve::<GreeterCapability>(KEY, None).unwrap();
    assert!(resolved.is_none());
}

#[test]
fn registered_type_is_instantiated() {
    let greeter = registry().resolve::<GreeterCapability>(KEY, Some("demo::English")).unwrap();
    assert_eq!(greeter.unwrap().greet(), "hello");
}

#[test]
fn unknown_type_reports_not_found() {
    let err = registry().resolve::<GreeterCapability>(KEY, Some("invalid_provider")).err().unwrap();
    assert_eq!(
        err.to_string(),
        "Invalid value invalid_provider for configuration demo.greeter.class: Class \
         invalid_provider could not be found."
    );
}

#[test]
fn type_without_capability_reports_mismatch() {
    let registry = registry();
    let err = registry.resolve::<GreeterCapability>(KEY, Some("std::vec::Vec")).err().unwrap();
    assert_eq!(
        err.to_string(),
        "Invalid value class std::vec::Vec for configuration demo.greeter.class: Class must \
         extend interface demo::Greeter"
    );
    let err = registry.resolve::<GreeterCapability>(KEY, Some("demo::Tally")).err().unwrap();
    assert!(matches!(err, ConfigError::CapabilityMismatch { .. }));
}

#[test]
fn capability_without_no_args_constructor_is_rejected() {
    let err = registry().resolve::<GreeterCapability>(KEY, Some("demo::Formal")).err().unwrap();
    assert_eq!(
        err.to_string(),
        "Invalid value class demo::Formal for configuration demo.greeter.class: Class must have \
         no args constructor"
    );
}

#[test]
fn every_resolution_builds_a_fresh_instance() {
    let registry = registry();
    let first = registry.resolve::<GreeterCapability>(KEY, Some("demo::English")).unwrap().unwrap();
    let second =
        registry.resolve::<GreeterCapability>(KEY, Some("demo::English")).unwrap().unwrap();
    assert_ne!(first.serial(), second.serial());
}

#[test]
fn resolves_through_validated_values() {
    let schema = Schema::builder(Some("demo"))
        .define(KeySpec::new("greeter.class", ValueType::TypeName).optional())
        .build()
        .unwrap();
    let registry = registry();
    let raw: RawConfig = [("demo.greeter.class", "demo::Tally")].into_iter().collect();
    let values = schema.validate(&raw, &registry).unwrap();
    let err = values.resolve::<GreeterCapability>("greeter.class", &registry).err().unwrap();
    assert_eq!(
        err,
        ConfigError::CapabilityMismatch {
            key: KEY.to_string(),
            name: "demo::Tally".to_string(),
            capability: "demo::Greeter".to_string(),
        }
    );
    let counter = values.resolve::<CounterCapability>("greeter.class", &registry).unwrap();
    assert_eq!(counter.unwrap().count(), 7);
}

#[test]
fn duplicate_and_blank_names_are_rejected() {
    let result = TypeRegistry::builder()
        .register(TypeDescriptor::new("demo::English"))
        .register(TypeDescriptor::new("demo::English"))
        .build();
    assert_eq!(result.unwrap_err(), RegistryError::DuplicateType("demo::English".to_string()));

    let result = TypeRegistry::builder().register(TypeDescriptor::new(" padded ")).build();
    assert!(matches!(result, Err(RegistryError::InvalidName(_))));
}

#[test]
fn descriptors_list_capabilities() {
    let registry = registry();
    let descriptor = registry.get("demo::English").unwrap();
    assert_eq!(descriptor.capabilities(), &["demo::Greeter"]);
    assert_eq!(descriptor.qualified_name(), "class demo::English");
    assert!(registry.get("std::vec::Vec").unwrap().capabilities().is_empty());
    assert_eq!(registry.names().count(), 4);
}

#[test]
fn required_capability_is_checked_in_key_order() {
    let schema = Schema::builder(Some("demo"))
        .define(
            KeySpec::new("greeter.class", ValueType::TypeName)
                .optional()
                .requires::<GreeterCapability>(),
        )
        .define(KeySpec::new("greeter.count", ValueType::Int).optional())
        .build()
        .unwrap();
    let registry = registry();
    let mut raw: RawConfig =
        [("demo.greeter.class", "demo::Tally"), ("demo.greeter.count", "many")]
            .into_iter()
            .collect();
    let err = schema.validate(&raw, &registry).unwrap_err();
    assert!(matches!(err, ConfigError::CapabilityMismatch { .. }));

    raw.insert("demo.greeter.class", "demo::Formal");
    let err = schema.validate(&raw, &registry).unwrap_err();
    assert!(matches!(err, ConfigError::NotDefaultConstructible { .. }));

    raw.insert("demo.greeter.class", "demo::English");
    let err = schema.validate(&raw, &registry).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value many for configuration demo.greeter.count: Not a number of type INT"
    );
}

#[test]
fn capability_on_non_type_key_is_rejected_at_build() {
    let result = Schema::builder(Some("demo"))
        .define(KeySpec::new("greeter", ValueType::String).requires::<GreeterCapability>())
        .build();
    assert_eq!(result.unwrap_err(), SchemaError::MisplacedCapability("demo.greeter".to_string()));
}
