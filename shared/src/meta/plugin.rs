use crate::MetaAttributeRegistry;

// Registry Plugin
/// Bundles meta-attribute registrations so a gameplay module can install its
/// channels with a single call
pub trait RegistryPlugin {
    fn build(&self, registry: &MetaAttributeRegistry);
}
