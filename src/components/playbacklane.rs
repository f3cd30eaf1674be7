//! Playback lane component.
//!
//! A [`PlaybackLane`] walks one action tab's commands in order, applying one
//! command and then waiting [`PACING_INTERVAL`] seconds before the next.
//!
//! # How It Works
//!
//! 1. [`start_playback`](crate::systems::playback::start_playback) spawns one
//!    lane entity per queue in the snapshot it was given
//! 2. The [`playback_lane_system`](crate::systems::playback::playback_lane_system)
//!    runs each tick:
//!    - On the lane's first tick no time is consumed, so the first command
//!      applies right away
//!    - Afterwards delta time is taken off `cooldown`; whenever it reaches
//!      zero the next command applies and `cooldown` grows by the pacing interval
//!    - Once every command has applied and the last wait has elapsed, the lane
//!      despawns and a [`LaneFinishedEvent`](crate::events::playback::LaneFinishedEvent)
//!      fires
//!
//! Lanes of one or many playbacks are independent: they share no state apart
//! from the sprites they move, and each lane moves a single sprite.

use std::fmt;

use bevy_ecs::prelude::Component;

use crate::components::actiontab::ActionId;
use crate::components::sprite::SpriteId;

/// Seconds between two successive commands of one lane.
pub const PACING_INTERVAL: f32 = 0.5;

/// Handle returned by `play`, shared by all lanes it started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaybackId(pub u64);

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "playback#{}", self.0)
    }
}

#[derive(Component, Clone, Debug)]
pub struct PlaybackLane {
    pub playback: PlaybackId,
    pub action: ActionId,
    /// Sprite the commands move. `None` when the action id was never bound;
    /// the lane still paces through its commands without effect.
    pub sprite: Option<SpriteId>,
    /// Snapshot of the queue taken when playback started.
    pub commands: Vec<String>,
    /// Index of the next command to apply.
    pub cursor: usize,
    /// Seconds left before the next step is due.
    pub cooldown: f32,
    /// Whether the lane has been visited by the lane system yet.
    pub started: bool,
}

impl PlaybackLane {
    pub fn new(
        playback: PlaybackId,
        action: ActionId,
        sprite: Option<SpriteId>,
        commands: Vec<String>,
    ) -> Self {
        Self {
            playback,
            action,
            sprite,
            commands,
            cursor: 0,
            cooldown: 0.0,
            started: false,
        }
    }

    /// The command due next, if any remain.
    pub fn current(&self) -> Option<&str> {
        self.commands.get(self.cursor).map(String::as_str)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.commands.len()
    }
}
