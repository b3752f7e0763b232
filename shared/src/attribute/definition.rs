use std::fmt;

use crate::{attribute::clamp::ClampRange, Name, SchemaError};

/// Static definition of one attribute, shared by every entity of a set type
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDef {
    name: Name,
    category: String,
    description: Option<String>,
    base_value: f32,
    replicated: bool,
    notify_on_replicate: bool,
    generate_hooks: bool,
    clamp: ClampRange,
    meta_attribute: Option<Name>,
}

impl AttributeDef {
    /// Create a new local (non-replicated), unbounded attribute with hooks
    /// enabled and a base value of zero
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            category: "Attributes".to_string(),
            description: None,
            base_value: 0.0,
            replicated: false,
            notify_on_replicate: false,
            generate_hooks: true,
            clamp: ClampRange::unbounded(),
            meta_attribute: None,
        }
    }

    // Builder

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_base_value(mut self, value: f32) -> Self {
        self.base_value = value;
        self
    }

    /// Replicate this attribute and notify the Replica when updates arrive
    pub fn replicated(mut self) -> Self {
        self.replicated = true;
        self.notify_on_replicate = true;
        self
    }

    /// Replicate this attribute without a replication notification
    pub fn replicated_silent(mut self) -> Self {
        self.replicated = true;
        self.notify_on_replicate = false;
        self
    }

    pub fn with_replication(mut self, replicated: bool, notify_on_replicate: bool) -> Self {
        self.replicated = replicated;
        self.notify_on_replicate = notify_on_replicate;
        self
    }

    pub fn without_hooks(self) -> Self {
        self.with_hooks(false)
    }

    pub fn with_hooks(mut self, generate_hooks: bool) -> Self {
        self.generate_hooks = generate_hooks;
        self
    }

    pub fn meta_attribute(mut self, key: impl Into<Name>) -> Self {
        self.meta_attribute = Some(key.into());
        self
    }

    /// Set both clamp bounds
    ///
    /// Returns an error if `min > max`.
    pub fn clamp(self, min: f32, max: f32) -> Result<Self, SchemaError> {
        self.try_clamp_range(Some(min), Some(max))
    }

    pub fn clamp_min(self, min: f32) -> Result<Self, SchemaError> {
        let max = self.clamp.max();
        self.try_clamp_range(Some(min), max)
    }

    pub fn clamp_max(self, max: f32) -> Result<Self, SchemaError> {
        let min = self.clamp.min();
        self.try_clamp_range(min, Some(max))
    }

    pub fn try_clamp_range(
        mut self,
        min: Option<f32>,
        max: Option<f32>,
    ) -> Result<Self, SchemaError> {
        self.clamp = ClampRange::new(min, max)?;
        Ok(self)
    }

    // Accessors

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn initial_value(&self) -> f32 {
        self.clamp.apply(self.base_value)
    }

    pub fn is_replicated(&self) -> bool {
        self.replicated
    }

    /// Only replicated attributes can notify on replication
    pub fn notifies_on_replicate(&self) -> bool {
        self.replicated && self.notify_on_replicate
    }

    pub fn generates_hooks(&self) -> bool {
        self.generate_hooks
    }

    pub fn clamp_range(&self) -> &ClampRange {
        &self.clamp
    }

    pub fn meta_attribute_key(&self) -> Option<&Name> {
        self.meta_attribute.as_ref()
    }

    /// The metadata line describing this attribute, e.g.
    /// `Replicate=true, GenerateHooks=true, SkipOnRep=false, ClampMin=0, ClampMax=100`
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttributeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Replicate={}, GenerateHooks={}, SkipOnRep={}",
            self.replicated,
            self.generate_hooks,
            self.replicated && !self.notify_on_replicate
        )?;
        if let Some(min) = self.clamp.min() {
            write!(f, ", ClampMin={}", min)?;
        }
        if let Some(max) = self.clamp.max() {
            write!(f, ", ClampMax={}", max)?;
        }
        if let Some(key) = &self.meta_attribute {
            write!(f, ", MetaAttribute={}", key)?;
        }
        Ok(())
    }
}
