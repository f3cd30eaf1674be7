//! Action tab components.
//!
//! An action tab is one ordered motion sequence bound to exactly one sprite.
//! Tabs are entities carrying:
//! - [`ActionTab`] – identifier, owning sprite, label and creation order
//! - [`TrackedPosition`] – the position the collision monitor tests, if any
//! - [`BoxCollider`](super::boxcollider::BoxCollider) – the 50×50 collision box
//!
//! The queue of motions itself lives in
//! [`MotionQueues`](crate::resources::motionqueues::MotionQueues), keyed by
//! [`ActionId`].

use std::fmt;

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::components::mapposition::MapPosition;
use crate::components::sprite::SpriteId;

/// Key of an action tab and of its motion queue.
///
/// Distinct from [`SpriteId`]: a sprite's first tab is `"1"`, its second
/// `"1-2"`, and so on. Any string is accepted so collaborators can use their
/// own keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of the `index`-th (1-based) tab of `sprite`.
    pub fn for_tab(sprite: SpriteId, index: u32) -> Self {
        if index <= 1 {
            Self(sprite.to_string())
        } else {
            Self(format!("{sprite}-{index}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<SpriteId> for ActionId {
    fn from(value: SpriteId) -> Self {
        Self::for_tab(value, 1)
    }
}

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct ActionTab {
    pub id: ActionId,
    pub sprite: SpriteId,
    /// "Action N", N counting the sprite's tabs from 1.
    pub label: String,
    /// Stage-wide creation sequence number; the collision monitor walks tabs in this order.
    pub order: u32,
}

/// Position used for collision tests. `None` never collides.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackedPosition(pub Option<MapPosition>);
