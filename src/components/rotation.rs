use bevy_ecs::prelude::Component;

/// Rotation in degrees. Never normalized: four `Turn Right` give 360, not 0.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub struct Rotation {
    pub degrees: i32,
}
