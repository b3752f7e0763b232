pub mod assertions;
pub mod loopback;
pub mod recording_hooks;

pub use logging::init_logging;
pub use loopback::LoopbackTransport;
pub use recording_hooks::{HookEvent, RecordingHooks};
