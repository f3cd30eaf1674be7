//! Event types and observers used by the stage.
//!
//! Submodules:
//! - [`collision`] – overlap notifications between action tabs, and the observer swapping their queues
//! - [`playback`] – lane and playback completion notifications
pub mod collision;
pub mod playback;
