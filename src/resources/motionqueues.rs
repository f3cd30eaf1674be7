//! Motion queue store.
//!
//! The [`MotionQueues`] resource owns, for every action tab, the ordered list
//! of motion command strings assigned to it. All access goes through its
//! methods; nothing else keeps a copy except the snapshot a playback takes
//! when it starts.
//!
//! Every effective mutation bumps [`MotionQueues::revision`], which the
//! collision monitor uses to notice queue edits.

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::actiontab::ActionId;

#[derive(Debug, Clone, Default, Resource)]
pub struct MotionQueues {
    queues: FxHashMap<ActionId, Vec<String>>,
    revision: u64,
}

impl MotionQueues {
    /// Make sure `action` has a queue, creating an empty one if needed.
    pub fn ensure(&mut self, action: &ActionId) {
        if !self.queues.contains_key(action) {
            self.queues.insert(action.clone(), Vec::new());
            self.revision += 1;
        }
    }

    /// Push `command` to the end of the queue of `action`.
    pub fn append(&mut self, action: &ActionId, command: impl Into<String>) {
        self.queues
            .entry(action.clone())
            .or_default()
            .push(command.into());
        self.revision += 1;
    }

    /// Remove the command at `index`. Unknown ids and out-of-range indices are ignored.
    pub fn delete_at(&mut self, action: &ActionId, index: usize) -> bool {
        let Some(queue) = self.queues.get_mut(action) else {
            return false;
        };
        if index >= queue.len() {
            return false;
        }
        queue.remove(index);
        self.revision += 1;
        true
    }

    /// Commands of `action`, empty if it has no queue.
    pub fn get(&self, action: &ActionId) -> &[String] {
        self.queues.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, action: &ActionId) -> bool {
        self.queues.contains_key(action)
    }

    /// Exchange the whole queues of `a` and `b`.
    ///
    /// Both ids must already have a queue (empty counts). When either one
    /// was never created, or both are the same id, nothing happens.
    pub fn swap(&mut self, a: &ActionId, b: &ActionId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        let queue_a = self.queues.remove(a).unwrap_or_default();
        let queue_b = self.queues.remove(b).unwrap_or_default();
        self.queues.insert(a.clone(), queue_b);
        self.queues.insert(b.clone(), queue_a);
        self.revision += 1;
        debug!("Swapped motion queues of {} and {}", a, b);
        true
    }

    /// Copy of every queue, as handed to a playback.
    pub fn snapshot(&self) -> FxHashMap<ActionId, Vec<String>> {
        self.queues.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActionId, &[String])> {
        self.queues.iter().map(|(id, q)| (id, q.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Counter bumped by every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
