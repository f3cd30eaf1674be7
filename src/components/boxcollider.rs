use bevy_ecs::prelude::Component;

use crate::components::mapposition::MapPosition;

/// Side length of the square box every action tab collides with.
pub const ACTION_BOX_SIZE: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct BoxCollider {
    pub width: i32,
    pub height: i32,
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self::new(ACTION_BOX_SIZE, ACTION_BOX_SIZE)
    }
}

impl BoxCollider {
    /// Create a BoxCollider with given size, anchored at the tracked position.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: MapPosition) -> (MapPosition, MapPosition) {
        let (x0, y0) = (position.x, position.y);
        let x1 = x0.saturating_add(self.width);
        let y1 = y0.saturating_add(self.height);
        (
            MapPosition::new(x0.min(x1), y0.min(y1)),
            MapPosition::new(x0.max(x1), y0.max(y1)),
        )
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different position.
    /// Touching edges do not overlap.
    pub fn overlaps(&self, position: MapPosition, other: &Self, other_position: MapPosition) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}
