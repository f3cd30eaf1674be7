//! ECS components for entities.
//!
//! Sprites and action tabs are entities; these are the pieces they are made of.
//!
//! Submodules overview:
//! - [`actiontab`] – action tab identity and the position tracked for collisions
//! - [`boxcollider`] – axis-aligned rectangular collider for collision detection
//! - [`mapposition`] – stage-space position of a sprite
//! - [`playbacklane`] – one running sequence of motions during playback
//! - [`rotation`] – rotation angle in degrees
//! - [`sprite`] – sprite identity and kind, plus its read-back view

pub mod actiontab;
pub mod boxcollider;
pub mod mapposition;
pub mod playbacklane;
pub mod rotation;
pub mod sprite;
