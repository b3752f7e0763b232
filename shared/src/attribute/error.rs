use thiserror::Error;

use crate::Name;

/// Errors that can occur while driving an AttributeSet's change pipeline.
///
/// Every variant is a contract violation: a wiring bug between whatever
/// proposes changes and the attribute definitions. None of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The attribute is not declared on this set
    #[error("Attribute '{attribute}' is not declared on AttributeSet '{set}'")]
    UnknownAttribute { set: Name, attribute: Name },

    /// The attribute index is outside this set's schema
    #[error("Attribute index {index} is out of range for AttributeSet '{set}' ({count} attributes)")]
    IndexOutOfRange { set: Name, index: u8, count: usize },

    /// A replicated update arrived for an attribute that does not replicate
    #[error("Attribute '{attribute}' is not replicated, it should never receive a replicated update")]
    NotReplicated { attribute: Name },

    /// A replicated update arrived on the authoritative copy
    #[error("AttributeSet '{set}' is the Authority and should never receive a replicated update for '{attribute}'")]
    AuthorityReceivedUpdate { set: Name, attribute: Name },

    /// Attempted to attach a per-attribute hook where hooks are not generated
    #[error("Attribute '{attribute}' does not generate hooks, cannot attach a post-change listener")]
    HooksDisabled { attribute: Name },
}

/// Errors that can occur while defining an AttributeSet schema
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Clamp bounds are inverted or NaN
    #[error("Invalid clamp range [{min}, {max}]: min must not exceed max")]
    InvalidClampRange { min: f32, max: f32 },

    /// An attribute was defined without a name
    #[error("AttributeSet '{set}' contains an attribute with an empty name")]
    EmptyAttributeName { set: Name },

    /// Two attributes share a name
    #[error("AttributeSet '{set}' defines attribute '{attribute}' more than once")]
    DuplicateAttribute { set: Name, attribute: Name },

    /// Attribute indices are u8, so a set holds at most 255 attributes
    #[error("AttributeSet '{set}' defines {count} attributes, the maximum is {max}")]
    TooManyAttributes { set: Name, count: usize, max: usize },

    /// An attribute names a meta-attribute key that is not registered
    #[error("Attribute '{attribute}' references unregistered meta-attribute '{key}'")]
    UnknownMetaAttribute { attribute: Name, key: Name },
}
