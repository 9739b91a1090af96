use std::collections::HashSet;

use tracing::debug;

use crate::rooms::TOTAL_ROOMS;

/// Exploration progress for one play session.
///
/// Created empty when a session starts and dropped with it. Nothing is
/// persisted; each session owns its own tracker.
#[derive(Debug, Default, Clone)]
pub struct NavigationTracker {
    visited: HashSet<String>,
    // First-visit order, for the history panel
    history: Vec<String>,
    current_room: Option<String>,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current room, recording a visit when a code is given.
    pub fn set_current_room(&mut self, code: Option<&str>) {
        self.current_room = code.map(str::to_string);
        if let Some(code) = code {
            self.mark_room_visited(code);
        }
    }

    pub fn mark_room_visited(&mut self, code: &str) {
        if self.visited.insert(code.to_string()) {
            debug!(code, visited = self.visited.len(), "room visited");
            self.history.push(code.to_string());
        }
    }

    pub fn current_room(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    pub fn is_room_visited(&self, code: &str) -> bool {
        self.visited.contains(code)
    }

    pub fn visit_history(&self) -> &[String] {
        &self.history
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Share of the fixed room total seen so far, rounded to a whole percent.
    pub fn completion_percentage(&self) -> u32 {
        let percent = self.visited.len() as f64 * 100.0 / TOTAL_ROOMS as f64;
        percent.round() as u32
    }

    pub fn reset(&mut self) {
        self.visited.clear();
        self.history.clear();
        self.current_room = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_empty() {
        let tracker = NavigationTracker::new();
        assert!(tracker.current_room().is_none());
        assert!(tracker.visit_history().is_empty());
        assert_eq!(tracker.completion_percentage(), 0);
    }

    #[test]
    fn test_two_rooms_visited() {
        let mut tracker = NavigationTracker::new();
        tracker.set_current_room(Some("1EC210"));
        tracker.set_current_room(Some("1EC211"));

        assert_eq!(tracker.visit_history(), ["1EC210", "1EC211"]);
        assert_eq!(tracker.current_room(), Some("1EC211"));
        assert!(tracker.is_room_visited("1EC210"));
        assert!(!tracker.is_room_visited("1EC205"));
        assert_eq!(tracker.completion_percentage(), 17);
    }

    #[test]
    fn test_revisit_is_idempotent() {
        let mut tracker = NavigationTracker::new();
        tracker.set_current_room(Some("2EC212"));
        tracker.set_current_room(Some("2EC212"));
        assert_eq!(tracker.visited_count(), 1);
        assert_eq!(tracker.visit_history().len(), 1);
    }

    #[test]
    fn test_clearing_current_room_keeps_history() {
        let mut tracker = NavigationTracker::new();
        tracker.set_current_room(Some("1EC204"));
        tracker.set_current_room(None);
        assert!(tracker.current_room().is_none());
        assert!(tracker.is_room_visited("1EC204"));
    }

    #[test]
    fn test_mark_visited_leaves_current_room() {
        let mut tracker = NavigationTracker::new();
        tracker.set_current_room(Some("1EC204"));
        tracker.mark_room_visited("2EC202");
        assert_eq!(tracker.current_room(), Some("1EC204"));
        assert_eq!(tracker.visited_count(), 2);
    }

    #[test]
    fn test_completion_rounding() {
        let mut tracker = NavigationTracker::new();
        let codes = [
            "1EC210", "1EC211", "1EC205", "1EC204", "2EC212", "2EC213", "2EC203", "2EC202",
            "3FINAL01", "3FINAL02", "3FINAL03", "3FINAL04",
        ];
        let expected = [8, 17, 25, 33, 42, 50, 58, 67, 75, 83, 92, 100];
        for (code, percent) in codes.iter().zip(expected) {
            tracker.set_current_room(Some(*code));
            assert_eq!(tracker.completion_percentage(), percent, "after {code}");
        }
    }

    #[test]
    fn test_reset() {
        let mut tracker = NavigationTracker::new();
        tracker.set_current_room(Some("1EC210"));
        tracker.reset();
        assert_eq!(tracker.visited_count(), 0);
        assert!(tracker.current_room().is_none());
    }
}
