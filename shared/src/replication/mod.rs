pub mod diff_mask;
pub mod error;
pub mod mut_channel;
pub mod mutator;
