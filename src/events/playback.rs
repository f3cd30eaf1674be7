//! Playback completion events.
//!
//! The [`playback_lane_system`](crate::systems::playback::playback_lane_system)
//! triggers a [`LaneFinishedEvent`] whenever a lane has applied all of its
//! commands and waited out its last pacing interval, and a
//! [`PlaybackFinishedEvent`] when the last lane of a playback finishes.
//!
//! # Example
//!
//! ```ignore
//! world.spawn(Observer::new(|trigger: On<PlaybackFinishedEvent>| {
//!     log::info!("{} done", trigger.event().playback);
//! }));
//! ```

use bevy_ecs::prelude::*;

use crate::components::actiontab::ActionId;
use crate::components::playbacklane::PlaybackId;

#[derive(Event, Debug, Clone, PartialEq)]
pub struct LaneFinishedEvent {
    pub playback: PlaybackId,
    pub action: ActionId,
    /// Stage time at which the lane finished.
    pub at: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlaybackFinishedEvent {
    pub playback: PlaybackId,
    /// Stage time at which the playback finished.
    pub at: f32,
}
