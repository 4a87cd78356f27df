// crates/tiered-storage-config/src/registry.rs
// ============================================================================
// Module: Type Registry
// Description: Named zero-argument factories grouped by capability.
// Purpose: Resolve configured type names into capability instances safely.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! Backends let operators name a component type in configuration (for
//! example a credentials provider). Instead of loading arbitrary code, names
//! are looked up in a [`TypeRegistry`] assembled at startup. Each registered
//! [`TypeDescriptor`] lists the capabilities it implements and, per
//! capability, whether it can be built without arguments.
//!
//! Resolution checks run in a fixed order and stop at the first failure:
//! unknown name, capability mismatch, missing zero-argument constructor.
//! A key declaring a [`CapabilityRequirement`] runs all three during schema
//! validation, so its errors surface in key order.
//! A successful resolution builds a fresh instance on every call; nothing is
//! cached across configuration objects.
//!
//! Invariants:
//! - A built registry is read-only; resolution never registers types.
//! - Factories are typed by capability, so a registered factory can only
//!   produce instances of that capability.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::any::Any;
use std::any::TypeId;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::ConfigError;
use crate::error::RegistryError;

// ============================================================================
// SECTION: Capability
// ============================================================================

/// Behavioral contract a configured type must satisfy.
///
/// Implemented by a marker type per capability, with `Instance` naming the
/// trait object handed back to the backend.
pub trait Capability: 'static {
    /// Trait object produced by resolution, e.g. `dyn CredentialsProvider`.
    type Instance: ?Sized + Send + Sync + 'static;

    /// Name embedded verbatim in capability-mismatch messages.
    const NAME: &'static str;
}

/// How a type provides a capability.
pub enum Constructor<C: Capability> {
    /// The type can be built with no arguments.
    NoArgs(fn() -> Box<C::Instance>),
    /// The type implements the capability but needs construction arguments.
    WithArgs,
}

// ============================================================================
// SECTION: Type Descriptor
// ============================================================================

/// Registry entry for one named type.
///
/// # Invariants
/// - At most one constructor per capability.
pub struct TypeDescriptor {
    /// Lookup name, e.g. `my_crate::module::Type`.
    name: String,
    /// Constructors keyed by the capability marker's `TypeId`.
    constructors: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    /// Capability names in registration order.
    capabilities: Vec<&'static str>,
}

impl TypeDescriptor {
    /// Creates a descriptor with no capabilities.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: HashMap::new(),
            capabilities: Vec::new(),
        }
    }

    /// Declares that the type implements `C` via `constructor`.
    ///
    /// Declaring the same capability twice keeps the last constructor.
    #[must_use]
    pub fn implements<C: Capability>(mut self, constructor: Constructor<C>) -> Self {
        if self.constructors.insert(TypeId::of::<C>(), Box::new(constructor)).is_none() {
            self.capabilities.push(C::NAME);
        }
        self
    }

    /// Returns the lookup name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the names of the capabilities this type implements.
    #[must_use]
    pub fn capabilities(&self) -> &[&'static str] {
        &self.capabilities
    }

    /// Returns the name as rendered in capability and constructor messages.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("class {}", self.name)
    }

    /// Returns the constructor registered for capability `C`.
    fn constructor<C: Capability>(&self) -> Option<&Constructor<C>> {
        self.constructors.get(&TypeId::of::<C>())?.downcast_ref::<Constructor<C>>()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// ============================================================================
// SECTION: Type Registry
// ============================================================================

/// Read-only registry of named types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Descriptors keyed by lookup name.
    types: BTreeMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Returns an empty registry; every lookup fails with not-found.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the descriptor registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Returns registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Resolves a configured type name into a fresh instance of `C`.
    ///
    /// `key` is the fully qualified configuration key, used in messages.
    /// A `None` type name means the component is intentionally unset and
    /// resolves to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns, in check order, [`ConfigError::TypeNotFound`],
    /// [`ConfigError::CapabilityMismatch`], or
    /// [`ConfigError::NotDefaultConstructible`].
    pub fn resolve<C: Capability>(
        &self,
        key: &str,
        type_name: Option<&str>,
    ) -> Result<Option<Box<C::Instance>>, ConfigError> {
        let Some(type_name) = type_name else {
            return Ok(None);
        };
        let name = type_name.trim();
        let factory = self.factory::<C>(key, name)?;
        debug!(key, type_name = name, capability = C::NAME, "resolved capability provider");
        Ok(Some(factory()))
    }

    /// Runs every resolution check for `type_name` without building an instance.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::resolve`], in the same order.
    pub fn ensure_resolvable<C: Capability>(
        &self,
        key: &str,
        type_name: &str,
    ) -> Result<(), ConfigError> {
        self.factory::<C>(key, type_name.trim()).map(|_| ())
    }

    /// Looks up the zero-argument factory of `name` for capability `C`.
    fn factory<C: Capability>(
        &self,
        key: &str,
        name: &str,
    ) -> Result<fn() -> Box<C::Instance>, ConfigError> {
        let Some(descriptor) = self.types.get(name) else {
            return Err(ConfigError::TypeNotFound {
                key: key.to_string(),
                name: name.to_string(),
            });
        };
        match descriptor.constructor::<C>() {
            None => Err(ConfigError::CapabilityMismatch {
                key: key.to_string(),
                name: descriptor.name.clone(),
                capability: C::NAME.to_string(),
            }),
            Some(Constructor::WithArgs) => Err(ConfigError::NotDefaultConstructible {
                key: key.to_string(),
                name: descriptor.name.clone(),
            }),
            Some(Constructor::NoArgs(factory)) => Ok(*factory),
        }
    }
}

// ============================================================================
// SECTION: Capability Requirement
// ============================================================================

/// Resolution check signature: `(registry, qualified_key, type_name)`.
pub type ResolvableCheck = fn(&TypeRegistry, &str, &str) -> Result<(), ConfigError>;

/// Capability a type-name key must resolve to, checked during validation.
#[derive(Clone, Copy)]
pub struct CapabilityRequirement {
    /// Capability name, for docs and logs.
    name: &'static str,
    /// Monomorphized [`TypeRegistry::ensure_resolvable`].
    check: ResolvableCheck,
}

impl CapabilityRequirement {
    /// Builds the requirement for capability `C`.
    #[must_use]
    pub fn of<C: Capability>() -> Self {
        Self {
            name: C::NAME,
            check: TypeRegistry::ensure_resolvable::<C>,
        }
    }

    /// Returns the capability name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Runs all three resolution stages for `type_name` under `key`.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's [`ConfigError`].
    pub fn ensure(
        &self,
        registry: &TypeRegistry,
        key: &str,
        type_name: &str,
    ) -> Result<(), ConfigError> {
        (self.check)(registry, key, type_name)
    }
}

impl fmt::Debug for CapabilityRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityRequirement").field(&self.name).finish()
    }
}

// ============================================================================
// SECTION: Registry Builder
// ============================================================================

/// Builder collecting descriptors before the registry is frozen.
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    /// Descriptors in registration order.
    descriptors: Vec<TypeDescriptor>,
}

impl TypeRegistryBuilder {
    /// Adds a descriptor.
    #[must_use]
    pub fn register(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when a name is blank, padded, or duplicated.
    pub fn build(self) -> Result<TypeRegistry, RegistryError> {
        let mut types = BTreeMap::new();
        for descriptor in self.descriptors {
            let name = descriptor.name.clone();
            if name.is_empty() || name.trim() != name {
                return Err(RegistryError::InvalidName(name));
            }
            if types.contains_key(&name) {
                return Err(RegistryError::DuplicateType(name));
            }
            types.insert(name, descriptor);
        }
        Ok(TypeRegistry {
            types,
        })
    }
}
