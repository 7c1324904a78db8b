use egui::Pos2;

/// Pointer bookkeeping for one drag session: where it started, where it was last seen, and whether
/// it has travelled far enough to count as a drag.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    start: Pos2,
    last: Pos2,
    has_moved: bool,
}

impl PointerTracker {
    pub(super) fn new(start: Pos2) -> Self {
        Self {
            start,
            last: start,
            has_moved: false,
        }
    }

    /// Feed a new pointer position. Returns `true` on the call that latches `has_moved`.
    pub(super) fn observe(&mut self, pos: Pos2, exceeds_threshold: impl Fn(f32) -> bool) -> bool {
        self.last = pos;
        if self.has_moved {
            return false;
        }
        if exceeds_threshold(self.start.distance(pos)) {
            self.has_moved = true;
            return true;
        }
        false
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn last(&self) -> Pos2 {
        self.last
    }

    /// Latched: once true it stays true for the rest of the session, even if the pointer comes
    /// back to where it started.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latches_once() {
        let mut tracker = PointerTracker::new(Pos2::new(10.0, 10.0));
        let threshold = |d: f32| d > 4.0;

        assert!(!tracker.observe(Pos2::new(12.0, 10.0), threshold));
        assert!(!tracker.has_moved());

        assert!(tracker.observe(Pos2::new(20.0, 10.0), threshold));
        assert!(tracker.has_moved());

        // Coming back to the start does not undo the latch.
        assert!(!tracker.observe(Pos2::new(10.0, 10.0), threshold));
        assert!(tracker.has_moved());
        assert_eq!(tracker.last(), Pos2::new(10.0, 10.0));
    }
}
