use std::sync::{Arc, Mutex};

use gasplus_shared::{AttributeDef, AttributeHooks, AttributeUpdated, Name};

/// One call into a set's hooks
#[derive(Clone, Debug, PartialEq)]
pub enum HookEvent {
    Pre { name: Name, proposed: f32 },
    Post(AttributeUpdated),
    Notify(AttributeUpdated),
}

/// Hooks that record every call, optionally scaling proposed values before
/// they are clamped
#[derive(Clone, Default)]
pub struct RecordingHooks {
    events: Arc<Mutex<Vec<HookEvent>>>,
    scale: Option<f32>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplies every proposed value by `factor` in the pre-change hook
    pub fn scaled(factor: f32) -> Self {
        Self {
            events: Arc::default(),
            scale: Some(factor),
        }
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<AttributeUpdated> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HookEvent::Notify(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: HookEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl AttributeHooks for RecordingHooks {
    fn pre_attribute_change(&mut self, def: &AttributeDef, value: &mut f32) {
        self.record(HookEvent::Pre {
            name: def.name().clone(),
            proposed: *value,
        });
        if let Some(factor) = self.scale {
            *value *= factor;
        }
    }

    fn post_attribute_change(&mut self, update: &AttributeUpdated) {
        self.record(HookEvent::Post(update.clone()));
    }

    fn on_replication_notify(&mut self, update: &AttributeUpdated) {
        self.record(HookEvent::Notify(update.clone()));
    }
}
