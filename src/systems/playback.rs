//! Playback scheduler.
//!
//! - [`start_playback`] – spawn one lane per queue of a snapshot
//! - [`playback_lane_system`] – advance every lane by the tick's delta time
//!
//! # Timeline
//!
//! With `P` the [`PACING_INTERVAL`], a lane of `n` commands started at `t0`
//! applies command `k` at `t0 + k·P` and finishes at `t0 + n·P`. A lane
//! without commands finishes on its first tick. When a tick spans several
//! intervals the due commands are applied in order within that tick.
//!
//! Lanes never wait on each other and playbacks never exclude each other:
//! starting a new playback while one runs simply adds lanes.

use bevy_ecs::prelude::*;
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::components::actiontab::ActionId;
use crate::components::mapposition::MapPosition;
use crate::components::playbacklane::{PACING_INTERVAL, PlaybackId, PlaybackLane};
use crate::components::rotation::Rotation;
use crate::components::sprite::SpriteId;
use crate::events::playback::{LaneFinishedEvent, PlaybackFinishedEvent};
use crate::motion::{MotionCmd, Transform};
use crate::resources::actiontabs::ActionTabs;
use crate::resources::playback::PlaybackTracker;
use crate::resources::spriteregistry::SpriteRegistry;
use crate::resources::worldtime::WorldTime;

/// Start playing `queues`, one lane per entry.
///
/// Each lane drives the sprite its action id is bound to in [`ActionTabs`].
/// The returned id completes once every lane has finished; see
/// [`PlaybackTracker::is_finished`] and [`PlaybackFinishedEvent`].
pub fn start_playback(world: &mut World, queues: FxHashMap<ActionId, Vec<String>>) -> PlaybackId {
    let bound: Vec<(ActionId, Option<SpriteId>, Vec<String>)> = {
        let tabs = world.resource::<ActionTabs>();
        queues
            .into_iter()
            .map(|(action, commands)| {
                let sprite = tabs.sprite_of(&action);
                (action, sprite, commands)
            })
            .collect()
    };
    let playback = world.resource_mut::<PlaybackTracker>().begin(bound.len());
    info!("Starting {} with {} lane(s)", playback, bound.len());

    if bound.is_empty() {
        let at = world.resource::<WorldTime>().elapsed;
        world.trigger(PlaybackFinishedEvent { playback, at });
        return playback;
    }
    for (action, sprite, commands) in bound {
        world.spawn(PlaybackLane::new(playback, action, sprite, commands));
    }
    playback
}

/// Advance playback lanes by the current tick's delta.
pub fn playback_lane_system(
    world_time: Res<WorldTime>,
    registry: Res<SpriteRegistry>,
    mut tracker: ResMut<PlaybackTracker>,
    mut lanes: Query<(Entity, &mut PlaybackLane)>,
    mut transforms: Query<(&mut MapPosition, &mut Rotation)>,
    mut commands: Commands,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut lane) in lanes.iter_mut() {
        if lane.started {
            lane.cooldown -= dt;
        } else {
            lane.started = true;
        }

        while lane.cooldown <= 0.0 {
            if lane.is_exhausted() {
                finish_lane(entity, &lane, world_time.elapsed, &mut tracker, &mut commands);
                break;
            }
            let cmd = lane.current().map(MotionCmd::parse).unwrap_or(MotionCmd::Noop);
            let target = lane
                .sprite
                .and_then(|sprite| registry.entity(sprite))
                .and_then(|e| transforms.get_mut(e).ok());
            match target {
                Some((mut position, mut rotation)) => {
                    let moved = cmd.apply(Transform {
                        position: *position,
                        rotation: rotation.degrees,
                    });
                    position.set_if_neq(moved.position);
                    rotation.set_if_neq(Rotation {
                        degrees: moved.rotation,
                    });
                    debug!("{}: {:?} -> {:?}", lane.action, cmd, moved);
                }
                None => debug!("{}: no sprite bound, {:?} skipped", lane.action, cmd),
            }
            lane.cursor += 1;
            lane.cooldown += PACING_INTERVAL;
        }
    }
}

fn finish_lane(
    entity: Entity,
    lane: &PlaybackLane,
    at: f32,
    tracker: &mut PlaybackTracker,
    commands: &mut Commands,
) {
    commands.entity(entity).despawn();
    commands.trigger(LaneFinishedEvent {
        playback: lane.playback,
        action: lane.action.clone(),
        at,
    });
    if tracker.finish_lane(lane.playback) {
        info!("{} finished at {:.3}s", lane.playback, at);
        commands.trigger(PlaybackFinishedEvent {
            playback: lane.playback,
            at,
        });
    }
}
