pub mod definition;
pub mod error;
pub mod plugin;
pub mod registry;
