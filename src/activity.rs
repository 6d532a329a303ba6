//! Activity tracking for the inactivity timer.
//!
//! The last-activity timestamp is the only datum shared between the button
//! interrupt path and the main loop, so it lives in a single `AtomicU32`.
//! Timestamps are milliseconds of a wrapping monotonic counter; all
//! arithmetic is wrapping, so a 49-day rollover does not stall sleep.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Timestamp of the most recent user- or event-driven activity.
pub struct ActivityTracker {
    last_activity: AtomicU32,
}

impl ActivityTracker {
    pub const fn new() -> Self {
        Self {
            last_activity: AtomicU32::new(0),
        }
    }

    /// Record activity at `now_ms`. Safe from interrupt context.
    pub fn record(&self, now_ms: u32) {
        self.last_activity.store(now_ms, Ordering::Release);
    }

    pub fn last_activity(&self) -> u32 {
        self.last_activity.load(Ordering::Acquire)
    }

    /// Milliseconds since the last recorded activity.
    pub fn idle_duration(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_activity())
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Button press handoff from interrupt context to the main loop.
///
/// The interrupt side records activity immediately and raises a pending
/// flag; the main loop consumes the flag once per iteration.
pub struct ButtonLatch {
    pending: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Interrupt side of a button press.
    pub fn press(&self, tracker: &ActivityTracker, now_ms: u32) {
        tracker.record(now_ms);
        self.pending.store(true, Ordering::Release);
    }

    /// Consume a pending press. Returns `true` at most once per press burst.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn idle_duration_counts_from_last_record() {
        let tracker = ActivityTracker::new();
        tracker.record(1_000);
        assert_eq!(tracker.idle_duration(1_000), 0);
        assert_eq!(tracker.idle_duration(4_500), 3_500);

        tracker.record(4_500);
        assert_eq!(tracker.idle_duration(4_600), 100);
    }

    #[test]
    fn idle_duration_survives_counter_wrap() {
        let tracker = ActivityTracker::new();
        tracker.record(u32::MAX - 99);
        assert_eq!(tracker.idle_duration(100), 200);
    }

    #[test]
    fn latch_is_consumed_once() {
        let tracker = ActivityTracker::new();
        let latch = ButtonLatch::new();
        assert!(!latch.take());

        latch.press(&tracker, 42);
        latch.press(&tracker, 43);
        assert_eq!(tracker.last_activity(), 43);
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn concurrent_writer_and_reader_never_tear() {
        // One writer plays the interrupt, one reader plays the main loop.
        // Every observed value must be one that was actually written, and
        // the final value must be the last write.
        let tracker = Arc::new(ActivityTracker::new());
        let latch = Arc::new(ButtonLatch::new());
        const WRITES: u32 = 50_000;
        const STRIDE: u32 = 0x0001_0001;

        let writer = {
            let tracker = Arc::clone(&tracker);
            let latch = Arc::clone(&latch);
            thread::spawn(move || {
                for i in 1..=WRITES {
                    latch.press(&tracker, i.wrapping_mul(STRIDE));
                }
            })
        };

        let reader = {
            let tracker = Arc::clone(&tracker);
            let latch = Arc::clone(&latch);
            thread::spawn(move || {
                for _ in 0..WRITES {
                    let seen = tracker.last_activity();
                    let upper = seen >> 16;
                    let lower = seen & 0xFFFF;
                    assert_eq!(upper, lower, "torn read: {seen:#x}");
                    let _ = latch.take();
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(tracker.last_activity(), WRITES.wrapping_mul(STRIDE));
    }
}
