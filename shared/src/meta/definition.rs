use crate::Name;

/// A registered meta-attribute: a transient channel that aggregates incoming
/// modifications (damage, healing, ...) before they are applied to core
/// attributes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaAttributeDefinition {
    pub key: Name,
    /// The attribute that stores this channel's accumulated value
    pub backing_attribute: Name,
    pub description: String,
}

impl MetaAttributeDefinition {
    pub fn new(
        key: impl Into<Name>,
        backing_attribute: impl Into<Name>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            backing_attribute: backing_attribute.into(),
            description: description.into(),
        }
    }
}
