//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `actiontabs` – action id to sprite bindings and tab selection
//! - `collisionmonitor` – change tracking for the collision & swap monitor
//! - `motionqueues` – ordered motion commands per action tab
//! - `playback` – lanes still running per playback
//! - `spriteregistry` – sprite ids, their entities and the current sprite
//! - `stageconfig` – settings loaded from the INI file
//! - `worldtime` – stage time and delta
pub mod actiontabs;
pub mod collisionmonitor;
pub mod motionqueues;
pub mod playback;
pub mod spriteregistry;
pub mod stageconfig;
pub mod worldtime;
