use std::fmt;

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::components::mapposition::MapPosition;

/// Stable identifier of a sprite. Assigned in increasing order starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SpriteId(pub u32);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which artwork the collaborator draws for the sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteKind {
    #[default]
    Cat,
    Earth,
}

impl SpriteKind {
    pub fn name(&self) -> &'static str {
        match self {
            SpriteKind::Cat => "cat",
            SpriteKind::Earth => "earth",
        }
    }

    /// Parse a kind name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cat" => Some(SpriteKind::Cat),
            "earth" => Some(SpriteKind::Earth),
            _ => None,
        }
    }
}

impl fmt::Display for SpriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a sprite entity. Position and rotation live in
/// [`MapPosition`] and [`Rotation`](super::rotation::Rotation).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub id: SpriteId,
    pub kind: SpriteKind,
}

/// Read-back view of a sprite, assembled from its components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpriteState {
    pub id: SpriteId,
    pub kind: SpriteKind,
    pub position: MapPosition,
    pub rotation: i32,
}

impl fmt::Display for SpriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sprite #{} at ({}, {}) rotated {}°",
            self.kind, self.id, self.position.x, self.position.y, self.rotation
        )
    }
}
