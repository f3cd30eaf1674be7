//! Sprite registry resource.
//!
//! Sprites are entities (see [`crate::components::sprite`]). The
//! [`SpriteRegistry`] hands out their ids, maps ids back to entities, and
//! remembers the current sprite: the one new action tabs are created for.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::sprite::SpriteId;

#[derive(Debug, Clone, Resource)]
pub struct SpriteRegistry {
    entities: FxHashMap<SpriteId, Entity>,
    /// Ids in creation order.
    order: Vec<SpriteId>,
    next_id: u32,
    current: Option<SpriteId>,
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self {
            entities: FxHashMap::default(),
            order: Vec::new(),
            next_id: 1,
            current: None,
        }
    }
}

impl SpriteRegistry {
    /// Reserve the next sprite id.
    pub fn next_id(&mut self) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record the entity of a freshly spawned sprite and make it current.
    pub fn register(&mut self, id: SpriteId, entity: Entity) {
        self.entities.insert(id, entity);
        self.order.push(id);
        self.current = Some(id);
    }

    pub fn entity(&self, id: SpriteId) -> Option<Entity> {
        self.entities.get(&id).copied()
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn ids(&self) -> &[SpriteId] {
        &self.order
    }

    pub fn current(&self) -> Option<SpriteId> {
        self.current
    }

    /// Make `id` current. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: SpriteId) -> bool {
        if self.contains(id) {
            self.current = Some(id);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_from_one() {
        let mut r = SpriteRegistry::default();
        assert_eq!(r.next_id(), SpriteId(1));
        assert_eq!(r.next_id(), SpriteId(2));
        assert_eq!(r.next_id(), SpriteId(3));
    }

    #[test]
    fn test_register_selects_and_select_rejects_unknown() {
        let mut world = World::new();
        let mut r = SpriteRegistry::default();
        let a = r.next_id();
        r.register(a, world.spawn_empty().id());
        let b = r.next_id();
        r.register(b, world.spawn_empty().id());
        assert_eq!(r.current(), Some(b));
        assert!(r.select(a));
        assert_eq!(r.current(), Some(a));
        assert!(!r.select(SpriteId(42)));
        assert_eq!(r.current(), Some(a));
        assert_eq!(r.ids(), [a, b]);
    }
}
