use std::{collections::HashMap, fmt, sync::Arc};

use log::{debug, warn};

use crate::{
    AttributeConfig, AttributeDef, AttributeError, AttributeHooks, AttributeMutator,
    AttributeSetSchema, AttributeUpdated, DiffMask, MetaAttributeRegistry, Name, NoopHooks,
    PostChangeListener, RepNotifyPolicy, ReplicatedValue,
};

/// Which copy of an entity's attributes this set is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeRole {
    /// The authoritative copy. Commits to replicated attributes raise the
    /// outbound dirty signal.
    Authority,
    /// A copy kept in sync by a replication transport
    Replica,
}

/// One entity's attribute values plus the change pipeline guarding them.
///
/// Every proposed value passes through [`AttributeSet::pre_change`] (hook,
/// then clamp) before it is stored, so no out-of-range value is ever
/// observable by replication or notification logic.
#[cfg_attr(feature = "bevy_support", derive(bevy_ecs::prelude::Component))]
pub struct AttributeSet {
    schema: Arc<AttributeSetSchema>,
    values: Vec<f32>,
    role: AttributeRole,
    config: AttributeConfig,
    mutator: Option<AttributeMutator>,
    hooks: Box<dyn AttributeHooks>,
    listeners: HashMap<u8, Vec<PostChangeListener>>,
}

impl AttributeSet {
    pub fn new(schema: Arc<AttributeSetSchema>, role: AttributeRole) -> Self {
        Self::with_config(schema, role, AttributeConfig::default())
    }

    pub fn authority(schema: Arc<AttributeSetSchema>) -> Self {
        Self::new(schema, AttributeRole::Authority)
    }

    pub fn replica(schema: Arc<AttributeSetSchema>) -> Self {
        Self::new(schema, AttributeRole::Replica)
    }

    pub fn with_config(
        schema: Arc<AttributeSetSchema>,
        role: AttributeRole,
        config: AttributeConfig,
    ) -> Self {
        let values = schema
            .attributes()
            .iter()
            .map(AttributeDef::initial_value)
            .collect();

        Self {
            schema,
            values,
            role,
            config,
            mutator: None,
            hooks: Box::new(NoopHooks),
            listeners: HashMap::new(),
        }
    }

    /// Replace the set-wide hooks
    pub fn with_hooks<H: AttributeHooks + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Attach the channel that receives the outbound dirty signal
    pub fn set_mutator(&mut self, mutator: AttributeMutator) {
        self.mutator = Some(mutator);
    }

    // Accessors

    pub fn schema(&self) -> &Arc<AttributeSetSchema> {
        &self.schema
    }

    pub fn name(&self) -> &Name {
        self.schema.name()
    }

    pub fn role(&self) -> AttributeRole {
        self.role
    }

    pub fn config(&self) -> &AttributeConfig {
        &self.config
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        let index = self.schema.index_of(name)?;
        self.value_at(index)
    }

    pub fn value_at(&self, index: u8) -> Option<f32> {
        self.values.get(index as usize).copied()
    }

    pub fn try_value(&self, name: &str) -> Result<f32, AttributeError> {
        let index = self.resolve(name)?;
        Ok(self.values[index as usize])
    }

    /// Every attribute name with its current value, in declaration order
    pub fn values(&self) -> impl Iterator<Item = (&Name, f32)> + '_ {
        self.schema
            .attributes()
            .iter()
            .zip(self.values.iter().copied())
            .map(|(def, value)| (def.name(), value))
    }

    /// Index lookup for an attribute declared on this set
    pub fn resolve(&self, name: &str) -> Result<u8, AttributeError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| AttributeError::UnknownAttribute {
                set: self.schema.name().clone(),
                attribute: Name::new(name),
            })
    }

    fn check_index(&self, index: u8) -> Result<(), AttributeError> {
        if (index as usize) < self.values.len() {
            return Ok(());
        }
        Err(AttributeError::IndexOutOfRange {
            set: self.schema.name().clone(),
            index,
            count: self.values.len(),
        })
    }

    // Pre-change

    /// Computes the value that would be committed for `proposed`: the
    /// set-wide pre-change hook runs, then the attribute's clamp.
    ///
    /// # Panics
    ///
    /// Panics if the attribute is not declared on this set and the contract
    /// policy is [`ContractPolicy::Panic`](crate::ContractPolicy::Panic).
    /// Under [`ContractPolicy::Log`](crate::ContractPolicy::Log) the violation
    /// is logged and `proposed` is returned unchanged.
    /// Consider using `try_pre_change` for non-panicking error handling.
    pub fn pre_change(&mut self, name: &str, proposed: f32) -> f32 {
        match self.try_pre_change(name, proposed) {
            Ok(accepted) => accepted,
            Err(error) => {
                self.config.contract_policy.violated(&error);
                proposed
            }
        }
    }

    /// Try to compute the value that would be committed for `proposed`
    ///
    /// Returns an error if the attribute is not declared on this set.
    pub fn try_pre_change(&mut self, name: &str, proposed: f32) -> Result<f32, AttributeError> {
        let index = self.resolve(name)?;
        Ok(self.pre_change_at(index, proposed))
    }

    fn pre_change_at(&mut self, index: u8, proposed: f32) -> f32 {
        let schema = Arc::clone(&self.schema);
        let def = &schema.attributes()[index as usize];

        let mut value = proposed;
        self.hooks.pre_attribute_change(def, &mut value);
        def.clamp_range().apply(value)
    }

    // Commit

    /// Runs the full pipeline for an externally proposed value: pre-change,
    /// commit, dirty signal, post-change.
    ///
    /// # Panics
    ///
    /// Panics if the attribute is not declared on this set and the contract
    /// policy is [`ContractPolicy::Panic`](crate::ContractPolicy::Panic).
    /// Consider using `try_apply_change` for non-panicking error handling.
    pub fn apply_change(&mut self, name: &str, proposed: f32) -> Option<AttributeUpdated> {
        match self.try_apply_change(name, proposed) {
            Ok(update) => Some(update),
            Err(error) => {
                self.config.contract_policy.violated(&error);
                None
            }
        }
    }

    /// Try to run the full pipeline for an externally proposed value
    ///
    /// Returns an error if the attribute is not declared on this set.
    pub fn try_apply_change(
        &mut self,
        name: &str,
        proposed: f32,
    ) -> Result<AttributeUpdated, AttributeError> {
        let index = self.resolve(name)?;
        Ok(self.commit(index, proposed))
    }

    /// Try to run the full pipeline, addressing the attribute by index
    ///
    /// Returns an error if the index is outside this set's schema.
    pub fn try_apply_change_at(
        &mut self,
        index: u8,
        proposed: f32,
    ) -> Result<AttributeUpdated, AttributeError> {
        self.check_index(index)?;
        Ok(self.commit(index, proposed))
    }

    fn commit(&mut self, index: u8, proposed: f32) -> AttributeUpdated {
        let accepted = self.pre_change_at(index, proposed);

        let slot = &mut self.values[index as usize];
        let old = *slot;
        *slot = accepted;

        let schema = Arc::clone(&self.schema);
        let def = &schema.attributes()[index as usize];

        if self.role == AttributeRole::Authority && def.is_replicated() {
            self.mark_dirty(index, def.name());
        }

        debug!(
            "AttributeSet {}: committed {} {} -> {} (proposed {})",
            schema.name(),
            def.name(),
            old,
            accepted,
            proposed
        );

        let update = AttributeUpdated {
            name: def.name().clone(),
            index,
            old,
            new: accepted,
        };
        self.post_change(&update);
        update
    }

    fn mark_dirty(&mut self, index: u8, name: &Name) {
        let Some(mutator) = &mut self.mutator else {
            warn!("Replicated AttributeSet should have a mutator immediately after creation.");
            return;
        };
        if !mutator.mutate(index) {
            warn!(
                "AttributeSet {}: dirty signal for {} (index {}) was not recorded",
                self.schema.name(),
                name,
                index
            );
        }
    }

    // Post-change

    fn post_change(&mut self, update: &AttributeUpdated) {
        self.hooks.post_attribute_change(update);
        if let Some(listeners) = self.listeners.get_mut(&update.index) {
            for listener in listeners.iter_mut() {
                listener(update);
            }
        }
    }

    /// Attach a listener that runs after every accepted commit to `name`,
    /// after the set-wide post-change hook
    ///
    /// # Panics
    ///
    /// Panics if the attribute is unknown or does not generate hooks and the
    /// contract policy is [`ContractPolicy::Panic`](crate::ContractPolicy::Panic).
    /// Consider using `try_on_post_change` for non-panicking error handling.
    pub fn on_post_change<F>(&mut self, name: &str, listener: F)
    where
        F: FnMut(&AttributeUpdated) + Send + Sync + 'static,
    {
        if let Err(error) = self.try_on_post_change(name, listener) {
            self.config.contract_policy.violated(&error);
        }
    }

    /// Try to attach a post-change listener to `name`
    ///
    /// Returns an error if the attribute is not declared on this set, or if it
    /// was defined without hooks.
    pub fn try_on_post_change<F>(&mut self, name: &str, listener: F) -> Result<(), AttributeError>
    where
        F: FnMut(&AttributeUpdated) + Send + Sync + 'static,
    {
        let index = self.resolve(name)?;
        let def = &self.schema.attributes()[index as usize];
        if !def.generates_hooks() {
            return Err(AttributeError::HooksDisabled {
                attribute: def.name().clone(),
            });
        }
        self.listeners
            .entry(index)
            .or_default()
            .push(Box::new(listener));
        Ok(())
    }

    // Replication

    /// Every replicated attribute with its index, in declaration order
    pub fn replicated_attributes(&self) -> impl Iterator<Item = (u8, &AttributeDef)> + '_ {
        self.schema
            .attributes()
            .iter()
            .enumerate()
            .filter(|(_, def)| def.is_replicated())
            .map(|(index, def)| (index as u8, def))
    }

    /// Current values of the replicated attributes whose bits are set in
    /// `mask`. Bits for non-replicated or unknown attributes are skipped.
    pub fn collect_updates(&self, mask: &DiffMask) -> Vec<ReplicatedValue> {
        mask.iter_set()
            .filter_map(|index| {
                let def = self.schema.get(index)?;
                if !def.is_replicated() {
                    return None;
                }
                Some(ReplicatedValue {
                    name: def.name().clone(),
                    index,
                    value: self.values[index as usize],
                })
            })
            .collect()
    }

    /// Current values of every replicated attribute, used to bring a newly
    /// created Replica in sync
    pub fn collect_all(&self) -> Vec<ReplicatedValue> {
        self.replicated_attributes()
            .map(|(index, def)| ReplicatedValue {
                name: def.name().clone(),
                index,
                value: self.values[index as usize],
            })
            .collect()
    }

    /// Stores an authoritative value delivered by the transport, then fires
    /// the replication notification if the attribute asks for one. Returns
    /// the notified update, or None if no notification fired.
    ///
    /// # Panics
    ///
    /// Panics on a contract violation when the contract policy is
    /// [`ContractPolicy::Panic`](crate::ContractPolicy::Panic).
    /// Consider using `try_apply_replicated` for non-panicking error handling.
    pub fn apply_replicated(&mut self, name: &str, value: f32) -> Option<AttributeUpdated> {
        match self.try_apply_replicated(name, value) {
            Ok(notified) => notified,
            Err(error) => {
                self.config.contract_policy.violated(&error);
                None
            }
        }
    }

    /// Try to store an authoritative value delivered by the transport
    ///
    /// Returns an error if this set is the Authority, or if the attribute is
    /// unknown or not replicated.
    pub fn try_apply_replicated(
        &mut self,
        name: &str,
        value: f32,
    ) -> Result<Option<AttributeUpdated>, AttributeError> {
        let index = self.resolve(name)?;
        self.receive(index, value)
    }

    /// Try to store an authoritative value, addressing the attribute by index
    ///
    /// Returns an error if this set is the Authority, or if the index is out of
    /// range or names an attribute that is not replicated.
    pub fn try_apply_replicated_at(
        &mut self,
        index: u8,
        value: f32,
    ) -> Result<Option<AttributeUpdated>, AttributeError> {
        self.check_index(index)?;
        self.receive(index, value)
    }

    fn receive(
        &mut self,
        index: u8,
        value: f32,
    ) -> Result<Option<AttributeUpdated>, AttributeError> {
        let schema = Arc::clone(&self.schema);
        let def = &schema.attributes()[index as usize];

        if self.role == AttributeRole::Authority {
            return Err(AttributeError::AuthorityReceivedUpdate {
                set: schema.name().clone(),
                attribute: def.name().clone(),
            });
        }
        if !def.is_replicated() {
            return Err(AttributeError::NotReplicated {
                attribute: def.name().clone(),
            });
        }

        let slot = &mut self.values[index as usize];
        let old = *slot;
        *slot = value;

        let update = AttributeUpdated {
            name: def.name().clone(),
            index,
            old,
            new: value,
        };

        if !def.notifies_on_replicate() {
            return Ok(None);
        }
        if self.config.rep_notify == RepNotifyPolicy::OnChange && !update.changed() {
            return Ok(None);
        }

        self.hooks.on_replication_notify(&update);
        Ok(Some(update))
    }

    // Meta-attributes

    /// Index of the attribute in this set that absorbs the meta-attribute
    /// `key`. An attribute tagged with the key wins over the registry's
    /// backing attribute name. Returns None if the key is not registered or
    /// nothing in this set backs it.
    pub fn meta_backing(&self, registry: &MetaAttributeRegistry, key: &str) -> Option<u8> {
        let backing = registry.resolve(key)?;
        self.schema
            .meta_backing_index(key)
            .or_else(|| self.schema.index_of(backing.as_str()))
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.values() {
            map.entry(&name.as_str(), &value);
        }
        map.finish()
    }
}
