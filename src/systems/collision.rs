//! Collision & swap monitor systems.
//!
//! - [`track_sprite_positions`] – copy each tab's sprite position into its
//!   [`TrackedPosition`] (only when configured to follow sprites)
//! - [`collision_detector`] – test every ordered pair of action tabs and emit
//!   [`CollisionEvent`]s
//!
//! The detector is level-triggered but only wakes up on change: a tracked
//! position changed, a tab was added, or the motion queues were edited since
//! its last evaluation. With unchanged inputs it does nothing, so it never
//! undoes its own swap.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::actiontab::{ActionTab, TrackedPosition};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::events::collision::CollisionEvent;
use crate::resources::collisionmonitor::CollisionMonitor;
use crate::resources::motionqueues::MotionQueues;
use crate::resources::spriteregistry::SpriteRegistry;

/// Run condition: tracked positions follow sprites.
pub fn follows_sprites(monitor: Res<CollisionMonitor>) -> bool {
    monitor.follow_sprites
}

/// Keep each tab's tracked position on the position of the sprite it is bound to.
///
/// Writes only on actual change so change detection stays quiet while
/// sprites stand still.
pub fn track_sprite_positions(
    registry: Res<SpriteRegistry>,
    sprites: Query<&MapPosition>,
    mut tabs: Query<(&ActionTab, &mut TrackedPosition)>,
) {
    for (tab, mut tracked) in tabs.iter_mut() {
        let position = registry
            .entity(tab.sprite)
            .and_then(|e| sprites.get(e).ok())
            .copied();
        tracked.set_if_neq(TrackedPosition(position));
    }
}

/// Detect overlapping action tabs and emit a [`CollisionEvent`] per ordered pair.
///
/// Tabs are visited in creation order. For overlapping tabs `A` before `B`
/// the pair is reported as `(A, B)` and, flagged mirrored, as `(B, A)`.
/// Tabs without a tracked position never collide. When tracked positions
/// follow sprites, tabs of the same sprite share a position and are not
/// tested against each other.
pub fn collision_detector(
    tabs: Query<(&ActionTab, &TrackedPosition, &BoxCollider)>,
    changed: Query<(), Or<(Changed<TrackedPosition>, Added<ActionTab>)>>,
    queues: Res<MotionQueues>,
    mut monitor: ResMut<CollisionMonitor>,
    mut commands: Commands,
) {
    let queues_edited = monitor.seen_queue_revision != Some(queues.revision());
    if !queues_edited && changed.is_empty() {
        return;
    }
    monitor.seen_queue_revision = Some(queues.revision());
    monitor.evaluations += 1;

    let mut entries: Vec<(&ActionTab, MapPosition, &BoxCollider)> = tabs
        .iter()
        .filter_map(|(tab, tracked, collider)| tracked.0.map(|pos| (tab, pos, collider)))
        .collect();
    entries.sort_by_key(|(tab, _, _)| tab.order);

    for (i, (tab_a, pos_a, collider_a)) in entries.iter().enumerate() {
        for (j, (tab_b, pos_b, collider_b)) in entries.iter().enumerate() {
            if i == j || tab_a.id == tab_b.id {
                continue;
            }
            if monitor.follow_sprites && tab_a.sprite == tab_b.sprite {
                continue;
            }
            if collider_a.overlaps(*pos_a, collider_b, *pos_b) {
                debug!("Collision detected between {} and {}", tab_a.id, tab_b.id);
                commands.trigger(CollisionEvent {
                    a: tab_a.id.clone(),
                    b: tab_b.id.clone(),
                    mirrored: j < i,
                });
            }
        }
    }
}
