//! # GasPlus Shared
//! Gameplay attributes with a guarded change pipeline, authority to replica
//! replication signalling, and a process-wide meta-attribute registry.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod asset;
mod attribute;
mod config;
mod meta;
mod name;
mod replication;

pub mod presets;

pub use asset::{AssetError, AttributeSetAsset};
pub use attribute::{
    clamp::ClampRange,
    definition::AttributeDef,
    error::{AttributeError, SchemaError},
    hooks::{AttributeHooks, NoopHooks, PostChangeListener},
    schema::{AttributeSetSchema, AttributeSetSchemaBuilder, MAX_ATTRIBUTES},
    set::{AttributeRole, AttributeSet},
    update::{AttributeUpdated, ReplicatedValue},
};
pub use config::{AttributeConfig, ContractPolicy, RepNotifyPolicy};
pub use meta::{
    definition::MetaAttributeDefinition,
    error::MetaAttributeError,
    plugin::RegistryPlugin,
    registry::{MetaAttributeRegistry, DAMAGE_KEY, HEAL_KEY, SHIELD_DELTA_KEY},
};
pub use name::Name;
pub use replication::{
    diff_mask::DiffMask,
    error::ReplicationError,
    mut_channel::{MutChannel, MutReceiver, MutReceiverBuilder, MutSender},
    mutator::{AttributeMutate, AttributeMutator},
};
