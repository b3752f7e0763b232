pub mod clamp;
pub mod definition;
pub mod error;
pub mod hooks;
pub mod schema;
pub mod set;
pub mod update;
