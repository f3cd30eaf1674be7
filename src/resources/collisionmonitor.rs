use bevy_ecs::prelude::*;

/// State of the collision & swap monitor.
///
/// The monitor re-evaluates only when its inputs changed. Tracked positions
/// and tab creation are seen through change detection; queue edits through
/// [`MotionQueues::revision`](crate::resources::motionqueues::MotionQueues::revision).
/// After the monitor swaps queues itself it records the resulting revision,
/// so its own swaps never trigger another evaluation.
#[derive(Debug, Clone, Resource)]
pub struct CollisionMonitor {
    /// Keep each tab's tracked position on its sprite's position.
    pub follow_sprites: bool,
    /// Queue revision the last evaluation saw. `None` before the first one.
    pub seen_queue_revision: Option<u64>,
    /// Number of evaluations run so far.
    pub evaluations: u64,
}

impl CollisionMonitor {
    pub fn new(follow_sprites: bool) -> Self {
        Self {
            follow_sprites,
            seen_queue_revision: None,
            evaluations: 0,
        }
    }
}

impl Default for CollisionMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
