use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::{debug, info, warn};
use once_cell::sync::Lazy;

use crate::{ContractPolicy, MetaAttributeDefinition, MetaAttributeError, Name, RegistryPlugin};

pub const DAMAGE_KEY: &str = "Damage";
pub const HEAL_KEY: &str = "Heal";
pub const SHIELD_DELTA_KEY: &str = "ShieldDelta";

static GLOBAL_REGISTRY: Lazy<MetaAttributeRegistry> = Lazy::new(MetaAttributeRegistry::new);

/// Table of meta-attribute keys known to the process.
///
/// Registrations are never removed, and re-registering a key never replaces
/// the first definition, so anything that has been returned by a lookup stays
/// valid for the lifetime of the registry. The map lock is only held for the
/// map access itself, never while logging.
#[cfg_attr(feature = "bevy_support", derive(bevy_ecs::prelude::Resource))]
pub struct MetaAttributeRegistry {
    definitions: Mutex<HashMap<Name, MetaAttributeDefinition>>,
    contract_policy: ContractPolicy,
}

impl MetaAttributeRegistry {
    /// A registry pre-populated with the built-in Damage, Heal and
    /// ShieldDelta channels, using the build's default contract policy
    pub fn new() -> Self {
        Self::with_policy(ContractPolicy::default())
    }

    /// A registry that reports `required` lookups of unknown keys through
    /// `contract_policy`
    pub fn with_policy(contract_policy: ContractPolicy) -> Self {
        let registry = Self {
            definitions: Mutex::new(HashMap::new()),
            contract_policy,
        };
        registry.register_builtins();
        registry
    }

    /// The process-wide registry. Built-ins are registered exactly once, on
    /// first access, regardless of how many threads race for it.
    pub fn global() -> &'static MetaAttributeRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn contract_policy(&self) -> ContractPolicy {
        self.contract_policy
    }

    fn register_builtins(&self) {
        self.register_extension(MetaAttributeDefinition::new(
            DAMAGE_KEY,
            DAMAGE_KEY,
            "Aggregates outgoing damage modifications before final application.",
        ));
        self.register_extension(MetaAttributeDefinition::new(
            HEAL_KEY,
            HEAL_KEY,
            "Aggregates incoming healing before it is applied to core attributes.",
        ));
        self.register_extension(MetaAttributeDefinition::new(
            SHIELD_DELTA_KEY,
            SHIELD_DELTA_KEY,
            "Captures shield-specific adjustments that may bypass health values.",
        ));
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Name, MetaAttributeDefinition>> {
        if self.definitions.is_poisoned() {
            // Entries are only ever inserted whole, so the map is intact
            warn!("MetaAttributeRegistry: recovering from a poisoned lock");
            self.definitions.clear_poison();
        }
        self.definitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a meta-attribute. Returns false, leaving the registry untouched,
    /// if the key is empty or already registered.
    pub fn register(&self, definition: MetaAttributeDefinition) -> bool {
        if definition.key.is_none() {
            warn!("MetaAttributeRegistry: ignoring registration with an empty key");
            return false;
        }

        let key = definition.key.clone();
        let backing_attribute = definition.backing_attribute.clone();
        let registered = {
            let mut definitions = self.lock();
            if definitions.contains_key(&key) {
                false
            } else {
                definitions.insert(key.clone(), definition);
                true
            }
        };

        if registered {
            info!(
                "MetaAttributeRegistry: Registering '{}' backed by '{}'",
                key, backing_attribute
            );
        } else {
            debug!(
                "MetaAttributeRegistry: '{}' is already registered, keeping the first definition",
                key
            );
        }
        registered
    }

    /// Entry point for gameplay modules adding their own channels. Same rules
    /// as [`MetaAttributeRegistry::register`].
    pub fn register_extension(&self, definition: MetaAttributeDefinition) -> bool {
        self.register(definition)
    }

    pub fn add_plugin<P: RegistryPlugin>(&self, plugin: P) -> &Self {
        plugin.build(self);
        self
    }

    pub fn find(&self, key: &str) -> Option<MetaAttributeDefinition> {
        self.lock().get(key).cloned()
    }

    /// Looks up a meta-attribute that must already be registered
    ///
    /// # Panics
    ///
    /// Panics if the key has not been registered and the contract policy is
    /// [`ContractPolicy::Panic`]. Under [`ContractPolicy::Log`] the violation
    /// is logged and an unbacked definition for `key` is returned, which no
    /// attribute set resolves.
    /// Consider using `try_required` for non-panicking error handling.
    pub fn required(&self, key: &str) -> MetaAttributeDefinition {
        match self.try_required(key) {
            Ok(definition) => definition,
            Err(error) => {
                self.contract_policy.violated(&error);
                MetaAttributeDefinition::new(Name::new(key), Name::none(), String::new())
            }
        }
    }

    /// Try to look up a meta-attribute that must already be registered
    ///
    /// Returns an error if the key has not been registered.
    pub fn try_required(&self, key: &str) -> Result<MetaAttributeDefinition, MetaAttributeError> {
        self.find(key).ok_or_else(|| MetaAttributeError::NotRegistered {
            key: Name::new(key),
        })
    }

    pub fn damage(&self) -> MetaAttributeDefinition {
        self.required(DAMAGE_KEY)
    }

    pub fn heal(&self) -> MetaAttributeDefinition {
        self.required(HEAL_KEY)
    }

    pub fn shield_delta(&self) -> MetaAttributeDefinition {
        self.required(SHIELD_DELTA_KEY)
    }

    /// The backing attribute name for `key`, if registered
    pub fn resolve(&self, key: &str) -> Option<Name> {
        self.lock()
            .get(key)
            .map(|definition| definition.backing_attribute.clone())
    }

    /// Every registered definition, sorted by key
    pub fn definitions(&self) -> Vec<MetaAttributeDefinition> {
        let mut definitions: Vec<_> = self.lock().values().cloned().collect();
        definitions.sort_by(|a, b| a.key.cmp(&b.key));
        definitions
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for MetaAttributeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
