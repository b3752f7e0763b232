use thiserror::Error;

use crate::Name;

/// Errors that can occur when looking up meta-attributes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaAttributeError {
    /// A required meta-attribute key has never been registered
    #[error("Meta-attribute '{key}' is not registered, it must be registered before it is required")]
    NotRegistered { key: Name },
}
