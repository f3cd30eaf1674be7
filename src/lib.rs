//! motionstage library.
//!
//! The scripting and playback core of a sprite animation editor: motion
//! command grammar, sprite transforms, per-tab motion queues, a paced
//! multi-lane playback scheduler, and a collision monitor that swaps the
//! queues of overlapping action tabs.
//!
//! Everything runs on a `bevy_ecs` world driven by [`stage::Stage`].

pub mod components;
pub mod events;
pub mod motion;
pub mod resources;
pub mod stage;
pub mod systems;
