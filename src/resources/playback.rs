use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::playbacklane::PlaybackId;

/// Bookkeeping of running playbacks: how many lanes each still has.
#[derive(Debug, Clone, Default, Resource)]
pub struct PlaybackTracker {
    remaining: FxHashMap<PlaybackId, usize>,
    next_id: u64,
}

impl PlaybackTracker {
    /// Open a playback with `lanes` lanes. A playback without lanes is finished at once.
    pub fn begin(&mut self, lanes: usize) -> PlaybackId {
        let id = PlaybackId(self.next_id);
        self.next_id += 1;
        if lanes > 0 {
            self.remaining.insert(id, lanes);
        }
        id
    }

    /// Count one lane of `id` as done. Returns true when it was the last one.
    pub fn finish_lane(&mut self, id: PlaybackId) -> bool {
        let Some(left) = self.remaining.get_mut(&id) else {
            return false;
        };
        *left = left.saturating_sub(1);
        if *left == 0 {
            self.remaining.remove(&id);
            true
        } else {
            false
        }
    }

    /// Whether every lane of `id` is done. Ids never handed out are not finished.
    pub fn is_finished(&self, id: PlaybackId) -> bool {
        id.0 < self.next_id && !self.remaining.contains_key(&id)
    }

    pub fn running(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_idle(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_count_down() {
        let mut t = PlaybackTracker::default();
        let id = t.begin(2);
        assert!(!t.is_finished(id));
        assert!(!t.finish_lane(id));
        assert!(t.finish_lane(id));
        assert!(t.is_finished(id));
        assert!(t.is_idle());
        assert!(!t.finish_lane(id));
    }

    #[test]
    fn test_empty_playback_is_finished_immediately() {
        let mut t = PlaybackTracker::default();
        let id = t.begin(0);
        assert!(t.is_finished(id));
        assert!(!t.is_finished(PlaybackId(id.0 + 1)));
    }

    #[test]
    fn test_playbacks_are_independent() {
        let mut t = PlaybackTracker::default();
        let a = t.begin(1);
        let b = t.begin(1);
        assert_ne!(a, b);
        assert_eq!(t.running(), 2);
        assert!(t.finish_lane(b));
        assert!(!t.is_finished(a));
        assert!(t.is_finished(b));
    }
}
