//! Action tab registry.
//!
//! Binds every action id to the sprite it moves and to the entity carrying
//! its [`ActionTab`](crate::components::actiontab::ActionTab),
//! [`TrackedPosition`](crate::components::actiontab::TrackedPosition) and
//! [`BoxCollider`](crate::components::boxcollider::BoxCollider). Playback
//! reads the bindings to know which sprite a lane drives.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::actiontab::ActionId;
use crate::components::sprite::SpriteId;

#[derive(Debug, Clone, Copy)]
pub struct TabBinding {
    pub sprite: SpriteId,
    pub entity: Entity,
}

#[derive(Debug, Clone, Default, Resource)]
pub struct ActionTabs {
    bindings: FxHashMap<ActionId, TabBinding>,
    /// Ids in creation order.
    order: Vec<ActionId>,
    /// Number of tabs created per sprite.
    per_sprite: FxHashMap<SpriteId, u32>,
    selected: Option<ActionId>,
}

impl ActionTabs {
    /// 1-based index the next tab of `sprite` will get.
    pub fn next_index(&self, sprite: SpriteId) -> u32 {
        self.per_sprite.get(&sprite).copied().unwrap_or(0) + 1
    }

    /// Creation order the next registered tab will get.
    pub fn next_order(&self) -> u32 {
        self.order.len() as u32
    }

    /// Record a spawned tab entity and select it.
    pub fn register(&mut self, id: ActionId, sprite: SpriteId, entity: Entity) {
        *self.per_sprite.entry(sprite).or_insert(0) += 1;
        self.bindings.insert(id.clone(), TabBinding { sprite, entity });
        self.order.push(id.clone());
        self.selected = Some(id);
    }

    pub fn contains(&self, id: &ActionId) -> bool {
        self.bindings.contains_key(id)
    }

    pub fn sprite_of(&self, id: &ActionId) -> Option<SpriteId> {
        self.bindings.get(id).map(|b| b.sprite)
    }

    pub fn entity_of(&self, id: &ActionId) -> Option<Entity> {
        self.bindings.get(id).map(|b| b.entity)
    }

    pub fn ids(&self) -> &[ActionId] {
        &self.order
    }

    /// Tabs of one sprite, in creation order.
    pub fn tabs_of(&self, sprite: SpriteId) -> Vec<&ActionId> {
        self.order
            .iter()
            .filter(|id| self.sprite_of(id) == Some(sprite))
            .collect()
    }

    pub fn selected(&self) -> Option<&ActionId> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, id: &ActionId) -> bool {
        if self.contains(id) {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }
}
