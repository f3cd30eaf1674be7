//! Collision event types and the queue-swap observer.
//!
//! The [`collision_detector`](crate::systems::collision::collision_detector)
//! emits a [`CollisionEvent`] for every ordered pair of action tabs whose
//! boxes overlap. Both directions of a pair are reported; the second one is
//! flagged as mirrored.
//!
//! [`swap_queues_on_collision`] reacts to the non-mirrored event of each pair
//! by exchanging the two tabs' motion queues.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::actiontab::ActionId;
use crate::resources::collisionmonitor::CollisionMonitor;
use crate::resources::motionqueues::MotionQueues;

/// Event fired when the boxes of two action tabs overlap.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: ActionId,
    pub b: ActionId,
    /// This is the `(b, a)` report of a pair already reported as `(a, b)`
    /// in the same evaluation.
    pub mirrored: bool,
}

/// Global observer that exchanges the queues of two colliding tabs.
///
/// Mirrored events are skipped so a pass swaps each pair once. The resulting
/// queue revision is recorded on the [`CollisionMonitor`] so the swap does
/// not count as a queue edit.
pub fn swap_queues_on_collision(
    trigger: On<CollisionEvent>,
    mut queues: ResMut<MotionQueues>,
    mut monitor: ResMut<CollisionMonitor>,
) {
    let event = trigger.event();
    if event.mirrored {
        return;
    }
    if queues.swap(&event.a, &event.b) {
        debug!("Collision between {} and {}: queues exchanged", event.a, event.b);
    }
    monitor.seen_queue_revision = Some(queues.revision());
}
