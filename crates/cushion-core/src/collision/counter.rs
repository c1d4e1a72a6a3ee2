use serde::{Deserialize, Serialize};

/// Accumulates per-frame contacts, ignoring frames that follow a counted frame
/// too closely.
///
/// Frame numbers are 1-based and expected to increase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionCounter {
    gap_frames: u64,
    last_counted: Option<u64>,
    total: u64,
    counted_events: u64,
}

impl CollisionCounter {
    pub fn new(gap_frames: u64) -> Self {
        Self {
            gap_frames,
            ..Default::default()
        }
    }

    /// Feed the contacts seen on `frame_no`. Returns whether they were counted.
    pub fn record(&mut self, frame_no: u64, contacts: u32) -> bool {
        if contacts == 0 {
            return false;
        }

        let cooled_down = match self.last_counted {
            None => true,
            Some(last) => frame_no.saturating_sub(last) > self.gap_frames,
        };
        if !cooled_down {
            tracing::trace!(frame_no, contacts, "contacts within cooldown, skipped");
            return false;
        }

        self.total += u64::from(contacts);
        self.counted_events += 1;
        self.last_counted = Some(frame_no);
        true
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of frames whose contacts were added to the total.
    pub fn counted_events(&self) -> u64 {
        self.counted_events
    }

    pub fn last_counted(&self) -> Option<u64> {
        self.last_counted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_hit_always_counts() {
        let mut counter = CollisionCounter::new(2);
        assert!(counter.record(1, 2));
        assert_eq!(counter.total(), 2);
        assert_eq!(counter.last_counted(), Some(1));
    }

    #[test]
    fn test_cooldown_is_strict() {
        let mut counter = CollisionCounter::new(2);
        assert!(counter.record(1, 1));
        assert!(!counter.record(2, 1));
        assert!(!counter.record(3, 1));
        assert!(counter.record(4, 1));
        assert_eq!(counter.total(), 2);
        assert_eq!(counter.counted_events(), 2);
    }

    #[test]
    fn test_empty_frames_do_not_reset_cooldown() {
        let mut counter = CollisionCounter::new(2);
        assert!(counter.record(5, 1));
        assert!(!counter.record(6, 0));
        assert!(!counter.record(7, 3));
        assert_eq!(counter.last_counted(), Some(5));
        assert!(counter.record(8, 3));
        assert_eq!(counter.total(), 4);
    }

    #[test]
    fn test_skipped_frames_keep_last_counted_reference() {
        // Frames 2 and 3 are skipped; frame 4 is measured from frame 1, not 3.
        let mut counter = CollisionCounter::new(2);
        let hits: Vec<bool> = (1..=6).map(|frame| counter.record(frame, 1)).collect();
        assert_eq!(hits, vec![true, false, false, true, false, false]);
    }

    #[test]
    fn test_zero_gap_counts_every_frame() {
        let mut counter = CollisionCounter::new(0);
        for frame in 1..=5 {
            assert!(counter.record(frame, 1));
        }
        assert_eq!(counter.total(), 5);
    }
}
