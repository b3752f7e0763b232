//! Ready-made schemas for the attribute sets most games start with.

use std::sync::Arc;

use crate::{AttributeDef, AttributeSetSchema, SchemaError};

/// Health, Mana and Stamina.
///
/// Health and Mana notify when replicated. Stamina replicates silently.
pub fn primary_attribute_set() -> Result<Arc<AttributeSetSchema>, SchemaError> {
    AttributeSetSchema::builder("Primary")
        .add_attribute(
            AttributeDef::new("Health")
                .with_category("Vitals")
                .with_description("Current health. Reaching zero means the owner is defeated.")
                .with_base_value(100.0)
                .replicated()
                .clamp(0.0, 100.0)?,
        )
        .add_attribute(
            AttributeDef::new("Mana")
                .with_category("Vitals")
                .with_description("Resource spent to activate abilities.")
                .with_base_value(250.0)
                .replicated()
                .clamp(0.0, 250.0)?,
        )
        .add_attribute(
            AttributeDef::new("Stamina")
                .with_category("Vitals")
                .with_description("Resource spent on movement and physical actions.")
                .with_base_value(150.0)
                .replicated_silent()
                .clamp(0.0, 150.0)?,
        )
        .build()
}

/// AttackPower, DefensePower and CriticalRate.
///
/// DefensePower only matters to the authority and is never replicated.
/// CriticalRate is a probability and does not take per-attribute listeners.
pub fn combat_attribute_set() -> Result<Arc<AttributeSetSchema>, SchemaError> {
    AttributeSetSchema::builder("Combat")
        .add_attribute(
            AttributeDef::new("AttackPower")
                .with_category("Combat")
                .with_description("Base outgoing damage before modifiers.")
                .replicated()
                .clamp_min(0.0)?,
        )
        .add_attribute(
            AttributeDef::new("DefensePower")
                .with_category("Combat")
                .with_description("Flat reduction applied to incoming damage."),
        )
        .add_attribute(
            AttributeDef::new("CriticalRate")
                .with_category("Combat")
                .with_description("Chance for an attack to critically strike.")
                .replicated()
                .without_hooks()
                .clamp(0.0, 1.0)?,
        )
        .build()
}
