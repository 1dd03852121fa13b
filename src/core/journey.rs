use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    Advanced { index: usize, complete: bool },
    Rejected,
}

/// Monotonic pointer over a fixed, ordered list of waypoints. The first
/// waypoint is where the journey starts, so `active_index` begins at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyTracker {
    waypoint_count: usize,
    active_index: usize,
    complete: bool,
}

impl JourneyTracker {
    pub fn new(waypoint_count: usize) -> Self {
        Self {
            waypoint_count,
            active_index: 0,
            // A single-stop journey has nothing left to walk.
            complete: waypoint_count <= 1,
        }
    }

    pub fn visit(&mut self, index: usize) -> VisitOutcome {
        if index != self.active_index + 1 || index >= self.waypoint_count {
            return VisitOutcome::Rejected;
        }

        self.active_index = index;
        if index == self.waypoint_count - 1 {
            self.complete = true;
        }

        VisitOutcome::Advanced {
            index,
            complete: self.complete,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn next_index(&self) -> Option<usize> {
        let next = self.active_index + 1;
        (next < self.waypoint_count).then_some(next)
    }

    pub fn is_visited(&self, index: usize) -> bool {
        index <= self.active_index
    }

    /// Legs between consecutive waypoints that have been travelled.
    pub fn is_leg_travelled(&self, from_index: usize) -> bool {
        self.active_index > from_index
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoint_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_next_waypoint_is_accepted() {
        let mut tracker = JourneyTracker::new(5);
        assert_eq!(tracker.active_index(), 0);

        assert_eq!(tracker.visit(2), VisitOutcome::Rejected);
        assert_eq!(tracker.active_index(), 0);

        assert_eq!(tracker.visit(1), VisitOutcome::Advanced { index: 1, complete: false });
        assert_eq!(tracker.active_index(), 1);
    }

    #[test]
    fn test_backwards_and_repeat_visits_are_rejected() {
        let mut tracker = JourneyTracker::new(5);
        tracker.visit(1);
        tracker.visit(2);

        assert_eq!(tracker.visit(2), VisitOutcome::Rejected);
        assert_eq!(tracker.visit(0), VisitOutcome::Rejected);
        assert_eq!(tracker.visit(1), VisitOutcome::Rejected);
        assert_eq!(tracker.active_index(), 2);
    }

    #[test]
    fn test_completion_on_last_waypoint() {
        let mut tracker = JourneyTracker::new(5);
        for index in 1..4 {
            tracker.visit(index);
            assert!(!tracker.is_complete());
        }
        assert_eq!(tracker.visit(4), VisitOutcome::Advanced { index: 4, complete: true });
        assert!(tracker.is_complete());
        assert_eq!(tracker.next_index(), None);

        // Past the end nothing moves.
        assert_eq!(tracker.visit(5), VisitOutcome::Rejected);
        assert_eq!(tracker.active_index(), 4);
    }

    #[test]
    fn test_visited_and_legs() {
        let mut tracker = JourneyTracker::new(3);
        tracker.visit(1);

        assert!(tracker.is_visited(0));
        assert!(tracker.is_visited(1));
        assert!(!tracker.is_visited(2));
        assert!(tracker.is_leg_travelled(0));
        assert!(!tracker.is_leg_travelled(1));
        assert_eq!(tracker.next_index(), Some(2));
    }

    #[test]
    fn test_single_stop_journey_is_complete() {
        let tracker = JourneyTracker::new(1);
        assert!(tracker.is_complete());
    }
}
