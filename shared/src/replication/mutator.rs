use std::sync::{Arc, RwLock};

/// Receives the outbound "this attribute changed" signal from an authoritative
/// AttributeSet. Implemented by replication transports.
pub trait AttributeMutate: Send + Sync + 'static {
    /// Marks the attribute at `attribute_index` dirty. Returns whether the
    /// signal was recorded.
    fn mutate(&mut self, attribute_index: u8) -> bool;
}

/// Shared handle to an AttributeMutate implementation, attached to an
/// authoritative AttributeSet
#[derive(Clone)]
pub struct AttributeMutator {
    inner: Arc<RwLock<dyn AttributeMutate>>,
}

impl AttributeMutator {
    pub fn new<M: AttributeMutate>(mutator: M) -> Self {
        Self {
            inner: Arc::new(RwLock::new(mutator)),
        }
    }

    pub fn mutate(&mut self, attribute_index: u8) -> bool {
        let Ok(mut inner) = self.inner.as_ref().write() else {
            return false;
        };
        inner.mutate(attribute_index)
    }
}
