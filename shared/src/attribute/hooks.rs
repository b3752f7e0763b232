use crate::{AttributeDef, AttributeUpdated};

/// Set-wide extension points of the change pipeline, implemented once per
/// concrete attribute set variant. Every method is a no-op by default.
pub trait AttributeHooks: Send + Sync {
    /// Runs before clamping. May adjust the proposed value; the result is
    /// still clamped afterwards.
    fn pre_attribute_change(&mut self, _def: &AttributeDef, _value: &mut f32) {}

    /// Runs once per accepted commit, before attribute-specific listeners
    fn post_attribute_change(&mut self, _update: &AttributeUpdated) {}

    /// Runs on a Replica after a replicated value has been stored, for
    /// attributes that notify on replicate
    fn on_replication_notify(&mut self, _update: &AttributeUpdated) {}
}

/// The default hooks: nothing happens
#[derive(Default)]
pub struct NoopHooks;

impl AttributeHooks for NoopHooks {}

/// Attribute-specific post-change listener
pub type PostChangeListener = Box<dyn FnMut(&AttributeUpdated) + Send + Sync>;
