//! Stage setup and the collaborator-facing API.
//!
//! A [`Stage`] owns the ECS world and the per-tick schedule. A UI (or the
//! bundled CLI) creates sprites and action tabs, fills motion queues, calls
//! [`Stage::play`], and then drives time with [`Stage::tick`], reading sprite
//! transforms and queues back after each tick.
//!
//! Each tick runs, in order:
//! 1. [`playback_lane_system`] – apply due motions
//! 2. [`track_sprite_positions`] – only when tracked positions follow sprites
//! 3. [`collision_detector`] – swap queues of overlapping tabs

use std::collections::BTreeMap;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::components::actiontab::{ActionId, ActionTab, TrackedPosition};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::playbacklane::PlaybackId;
use crate::components::rotation::Rotation;
use crate::components::sprite::{Sprite, SpriteId, SpriteKind, SpriteState};
use crate::events::collision::swap_queues_on_collision;
use crate::motion::Transform;
use crate::resources::actiontabs::ActionTabs;
use crate::resources::collisionmonitor::CollisionMonitor;
use crate::resources::motionqueues::MotionQueues;
use crate::resources::playback::PlaybackTracker;
use crate::resources::spriteregistry::SpriteRegistry;
use crate::resources::stageconfig::StageConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::{collision_detector, follows_sprites, track_sprite_positions};
use crate::systems::playback::{playback_lane_system, start_playback};
use crate::systems::time::update_world_time;

/// Where new sprites appear.
pub const SPRITE_START: MapPosition = MapPosition { x: 100, y: 100 };

/// Read-back view of an action tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSnapshot {
    pub id: ActionId,
    pub sprite: SpriteId,
    pub label: String,
    pub tracked: Option<MapPosition>,
}

/// Everything a collaborator renders, at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct StageSnapshot {
    pub elapsed: f32,
    pub sprites: Vec<SpriteState>,
    pub tabs: Vec<TabSnapshot>,
    pub queues: BTreeMap<ActionId, Vec<String>>,
}

pub struct Stage {
    world: World,
    update: Schedule,
}

impl Stage {
    pub fn new(config: &StageConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
        world.insert_resource(SpriteRegistry::default());
        world.insert_resource(ActionTabs::default());
        world.insert_resource(MotionQueues::default());
        world.insert_resource(PlaybackTracker::default());
        world.insert_resource(CollisionMonitor::new(config.follow_sprites));
        world.insert_resource(config.clone());

        world.spawn(Observer::new(swap_queues_on_collision));
        // Ensure the observer is registered before any system triggers collisions.
        world.flush();

        let mut update = Schedule::default();
        update.add_systems(
            (
                playback_lane_system,
                track_sprite_positions.run_if(follows_sprites),
                collision_detector,
            )
                .chain(),
        );

        let mut stage = Self { world, update };
        if config.starter_sprite {
            stage.add_sprite(SpriteKind::Cat);
            stage.add_action_tab();
        }
        stage
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &StageConfig {
        self.world.resource::<StageConfig>()
    }

    // --------------- Sprites ---------------

    /// Add a sprite at [`SPRITE_START`], unrotated, and make it current.
    pub fn add_sprite(&mut self, kind: SpriteKind) -> SpriteState {
        let id = self.world.resource_mut::<SpriteRegistry>().next_id();
        let entity = self
            .world
            .spawn((Sprite { id, kind }, SPRITE_START, Rotation::default()))
            .id();
        self.world
            .resource_mut::<SpriteRegistry>()
            .register(id, entity);
        info!("Added {} sprite #{}", kind, id);
        SpriteState {
            id,
            kind,
            position: SPRITE_START,
            rotation: 0,
        }
    }

    pub fn sprite(&self, id: SpriteId) -> Option<SpriteState> {
        let entity = self.world.resource::<SpriteRegistry>().entity(id)?;
        let sprite = self.world.get::<Sprite>(entity)?;
        let position = self.world.get::<MapPosition>(entity)?;
        let rotation = self.world.get::<Rotation>(entity)?;
        Some(SpriteState {
            id: sprite.id,
            kind: sprite.kind,
            position: *position,
            rotation: rotation.degrees,
        })
    }

    /// All sprites, in id order.
    pub fn sprites(&self) -> Vec<SpriteState> {
        self.world
            .resource::<SpriteRegistry>()
            .ids()
            .iter()
            .filter_map(|id| self.sprite(*id))
            .collect()
    }

    /// Replace a sprite's transform with `f(transform)`. Unknown ids are ignored.
    pub fn update_sprite(&mut self, id: SpriteId, f: impl FnOnce(Transform) -> Transform) -> bool {
        let Some(entity) = self.world.resource::<SpriteRegistry>().entity(id) else {
            return false;
        };
        let Ok(mut entity) = self.world.get_entity_mut(entity) else {
            return false;
        };
        let (Some(position), Some(rotation)) = (
            entity.get::<MapPosition>().copied(),
            entity.get::<Rotation>().copied(),
        ) else {
            return false;
        };
        let moved = f(Transform {
            position,
            rotation: rotation.degrees,
        });
        entity.insert((
            moved.position,
            Rotation {
                degrees: moved.rotation,
            },
        ));
        true
    }

    pub fn current_sprite(&self) -> Option<SpriteId> {
        self.world.resource::<SpriteRegistry>().current()
    }

    pub fn select_sprite(&mut self, id: SpriteId) -> bool {
        self.world.resource_mut::<SpriteRegistry>().select(id)
    }

    // --------------- Action tabs ---------------

    /// Add an action tab to the current sprite.
    pub fn add_action_tab(&mut self) -> Option<ActionId> {
        let sprite = self.current_sprite()?;
        self.add_action_tab_for(sprite)
    }

    /// Add an action tab to `sprite`, make that sprite current and select the tab.
    ///
    /// The tab starts with an empty queue and no tracked position.
    pub fn add_action_tab_for(&mut self, sprite: SpriteId) -> Option<ActionId> {
        if !self.select_sprite(sprite) {
            return None;
        }
        let (id, index, order) = {
            let tabs = self.world.resource::<ActionTabs>();
            let index = tabs.next_index(sprite);
            (ActionId::for_tab(sprite, index), index, tabs.next_order())
        };
        let entity = self
            .world
            .spawn((
                ActionTab {
                    id: id.clone(),
                    sprite,
                    label: format!("Action {index}"),
                    order,
                },
                TrackedPosition::default(),
                BoxCollider::default(),
            ))
            .id();
        self.world
            .resource_mut::<ActionTabs>()
            .register(id.clone(), sprite, entity);
        self.world.resource_mut::<MotionQueues>().ensure(&id);
        info!("Added action tab {} to sprite #{}", id, sprite);
        Some(id)
    }

    /// All action tabs, in creation order.
    pub fn action_tabs(&self) -> Vec<TabSnapshot> {
        let tabs = self.world.resource::<ActionTabs>();
        tabs.ids()
            .iter()
            .filter_map(|id| {
                let entity = tabs.entity_of(id)?;
                let tab = self.world.get::<ActionTab>(entity)?;
                let tracked = self.world.get::<TrackedPosition>(entity)?;
                Some(TabSnapshot {
                    id: tab.id.clone(),
                    sprite: tab.sprite,
                    label: tab.label.clone(),
                    tracked: tracked.0,
                })
            })
            .collect()
    }

    pub fn selected_tab(&self) -> Option<ActionId> {
        self.world.resource::<ActionTabs>().selected().cloned()
    }

    pub fn select_tab(&mut self, id: &ActionId) -> bool {
        self.world.resource_mut::<ActionTabs>().select(id)
    }

    /// Set or clear the position the collision monitor uses for `id`.
    pub fn set_tracked_position(&mut self, id: &ActionId, position: Option<MapPosition>) -> bool {
        let Some(entity) = self.world.resource::<ActionTabs>().entity_of(id) else {
            return false;
        };
        let Some(mut tracked) = self.world.get_mut::<TrackedPosition>(entity) else {
            return false;
        };
        tracked.set_if_neq(TrackedPosition(position));
        true
    }

    pub fn tracked_position(&self, id: &ActionId) -> Option<MapPosition> {
        let entity = self.world.resource::<ActionTabs>().entity_of(id)?;
        self.world.get::<TrackedPosition>(entity)?.0
    }

    // --------------- Motion queues ---------------

    pub fn append(&mut self, id: impl Into<ActionId>, command: impl Into<String>) {
        let id = id.into();
        let command = command.into();
        debug!("Appending {:?} to {}", command, id);
        self.world
            .resource_mut::<MotionQueues>()
            .append(&id, command);
    }

    pub fn delete_at(&mut self, id: &ActionId, index: usize) -> bool {
        self.world
            .resource_mut::<MotionQueues>()
            .delete_at(id, index)
    }

    pub fn swap(&mut self, a: &ActionId, b: &ActionId) -> bool {
        self.world.resource_mut::<MotionQueues>().swap(a, b)
    }

    pub fn queue(&self, id: &ActionId) -> &[String] {
        self.world.resource::<MotionQueues>().get(id)
    }

    pub fn queues(&self) -> &MotionQueues {
        self.world.resource::<MotionQueues>()
    }

    // --------------- Playback ---------------

    /// Play every motion queue as it stands now.
    pub fn play(&mut self) -> PlaybackId {
        let snapshot = self.queues().snapshot();
        self.play_queues(snapshot)
    }

    /// Play the given queues. First commands apply immediately.
    pub fn play_queues(&mut self, queues: FxHashMap<ActionId, Vec<String>>) -> PlaybackId {
        let playback = start_playback(&mut self.world, queues);
        self.tick(0.0);
        playback
    }

    pub fn is_finished(&self, playback: PlaybackId) -> bool {
        self.world.resource::<PlaybackTracker>().is_finished(playback)
    }

    /// No playback is running.
    pub fn is_idle(&self) -> bool {
        self.world.resource::<PlaybackTracker>().is_idle()
    }

    // --------------- Time ---------------

    /// Advance the stage by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Tick by `dt` until no playback runs or `max_ticks` ticks have passed.
    /// Returns the number of ticks taken.
    pub fn run_until_idle(&mut self, dt: f32, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.is_idle() && ticks < max_ticks {
            self.tick(dt);
            ticks += 1;
        }
        ticks
    }

    pub fn elapsed(&self) -> f32 {
        self.world.resource::<WorldTime>().elapsed
    }

    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            elapsed: self.elapsed(),
            sprites: self.sprites(),
            tabs: self.action_tabs(),
            queues: self
                .queues()
                .iter()
                .map(|(id, q)| (id.clone(), q.to_vec()))
                .collect(),
        }
    }
}
