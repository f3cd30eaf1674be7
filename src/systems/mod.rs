//! Stage systems.
//!
//! Submodules overview
//! - [`collision`] – tracked position upkeep and pairwise overlap checks between action tabs
//! - [`playback`] – start playbacks and advance their lanes
//! - [`time`] – update stage time and delta

pub mod collision;
pub mod playback;
pub mod time;
