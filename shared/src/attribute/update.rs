use crate::Name;

/// Emitted once for every committed change, and once for every replicated
/// value delivered to a Replica. Always produced after the new value is stored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "bevy_support", derive(bevy_ecs::prelude::Event))]
pub struct AttributeUpdated {
    pub name: Name,
    pub index: u8,
    pub old: f32,
    pub new: f32,
}

impl AttributeUpdated {
    pub fn changed(&self) -> bool {
        self.old != self.new
    }

    pub fn delta(&self) -> f32 {
        self.new - self.old
    }
}

/// A committed value ready for a transport to ship
#[derive(Clone, Debug, PartialEq)]
pub struct ReplicatedValue {
    pub name: Name,
    pub index: u8,
    pub value: f32,
}
