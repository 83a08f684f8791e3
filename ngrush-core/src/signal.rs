//! Interrupt signal
//!
//! Records whether (and when) the current player reacted. The waiting turn
//! polls it; a button handler, GPIO edge callback or keyboard thread sets it
//! from outside the turn's control flow.
//!
//! The signal stores the instant of the first reaction since the turn was
//! armed. A reaction counts for the turn only if it happened between the
//! turn's start and its deadline, even when the poller observes it a little
//! late. A reaction after the deadline has no effect: the turn is already
//! lost. A press stamped during an earlier turn but delivered after the next
//! one was armed is dropped.

use embassy_time::{Instant, Timer};
use portable_atomic::{AtomicU64, Ordering};

use crate::config::{MAX_POLL_INTERVAL, POLL_INTERVAL};

/// Sentinel tick value meaning "no reaction yet"
const UNSET: u64 = u64::MAX;

/// Cancellable, resettable reaction flag
pub struct InterruptSignal {
    /// Start of the current turn, in ticks
    armed: AtomicU64,
    stamp: AtomicU64,
}

impl Default for InterruptSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptSignal {
    /// Create an unset signal (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            armed: AtomicU64::new(0),
            stamp: AtomicU64::new(UNSET),
        }
    }

    /// Clear any previous reaction and start a turn now
    pub fn reset(&self) {
        self.arm(Instant::now());
    }

    /// Clear any previous reaction and start a turn at `start`
    ///
    /// Reactions stamped before `start` are ignored from here on.
    pub fn arm(&self, start: Instant) {
        self.armed.store(start.as_ticks(), Ordering::Release);
        self.stamp.store(UNSET, Ordering::Release);
    }

    /// Record a reaction now
    ///
    /// Safe to call from any thread. Only the first reaction of a turn is
    /// kept; later calls are no-ops.
    pub fn signal(&self) {
        self.signal_at(Instant::now());
    }

    /// Record a reaction that happened at `at`
    ///
    /// For sources that timestamp their events (edge-triggered GPIO).
    pub fn signal_at(&self, at: Instant) {
        // The sentinel is reserved; the clock never gets that far
        let ticks = at.as_ticks().min(UNSET - 1);
        let mut current = self.stamp.load(Ordering::Acquire);

        loop {
            let armed = self.armed.load(Ordering::Acquire);
            if ticks < armed {
                return;
            }
            // A stale stamp from a racing setter may still be replaced
            if current != UNSET && current >= armed {
                return;
            }
            match self.stamp.compare_exchange(
                current,
                ticks,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    /// Whether a reaction has been recorded for the current turn
    pub fn is_set(&self) -> bool {
        self.reacted_at().is_some()
    }

    /// Instant of the recorded reaction
    pub fn reacted_at(&self) -> Option<Instant> {
        let ticks = self.stamp.load(Ordering::Acquire);
        if ticks == UNSET || ticks < self.armed.load(Ordering::Acquire) {
            return None;
        }
        Some(Instant::from_ticks(ticks))
    }

    /// Wait until the player reacts or `deadline` passes
    ///
    /// Returns `true` if a reaction stamped at or before `deadline` was
    /// observed, `false` if the deadline elapsed first.
    pub async fn wait_until(&self, deadline: Instant) -> bool {
        let poll = POLL_INTERVAL.min(MAX_POLL_INTERVAL);

        loop {
            if let Some(at) = self.reacted_at() {
                return at <= deadline;
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            // Final poll lands exactly on the deadline
            Timer::at((now + poll).min(deadline)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::Duration;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_signal_is_idempotent() {
        let signal = InterruptSignal::new();
        assert!(!signal.is_set());

        let first = Instant::from_millis(100);
        signal.signal_at(first);
        signal.signal_at(Instant::from_millis(200));

        assert!(signal.is_set());
        assert_eq!(signal.reacted_at(), Some(first));
    }

    #[test]
    fn test_reset_clears() {
        let signal = InterruptSignal::new();
        signal.signal();
        signal.reset();
        assert!(!signal.is_set());
        assert_eq!(signal.reacted_at(), None);
    }

    #[test]
    fn test_times_out_without_reaction() {
        let signal = InterruptSignal::new();
        let start = Instant::now();
        let deadline = start + Duration::from_millis(30);

        assert!(!block_on(signal.wait_until(deadline)));
        assert!(Instant::now() >= deadline);
    }

    #[test]
    fn test_reaction_just_before_deadline_counts() {
        let signal = InterruptSignal::new();
        let deadline = Instant::now() + Duration::from_millis(40);

        signal.signal_at(deadline - Duration::from_millis(1));
        assert!(block_on(signal.wait_until(deadline)));
    }

    #[test]
    fn test_reaction_just_after_deadline_is_ignored() {
        let signal = InterruptSignal::new();
        let deadline = Instant::now() + Duration::from_millis(40);

        signal.signal_at(deadline + Duration::from_millis(1));
        assert!(!block_on(signal.wait_until(deadline)));
    }

    #[test]
    fn test_reaction_exactly_at_deadline_counts() {
        let signal = InterruptSignal::new();
        let deadline = Instant::now() + Duration::from_millis(10);

        signal.signal_at(deadline);
        assert!(block_on(signal.wait_until(deadline)));
    }

    #[test]
    fn test_reaction_from_another_thread() {
        let signal = Arc::new(InterruptSignal::new());
        let start = Instant::now();
        let deadline = start + Duration::from_secs(2);

        let setter = {
            let signal = Arc::clone(&signal);
            thread::spawn(move || {
                thread::sleep(StdDuration::from_millis(20));
                signal.signal();
            })
        };

        assert!(block_on(signal.wait_until(deadline)));
        // Observed within one poll interval, long before the deadline
        assert!(start.elapsed() < Duration::from_millis(20) + MAX_POLL_INTERVAL * 3);
        setter.join().unwrap();
    }

    #[test]
    fn test_stale_reaction_does_not_leak_into_next_turn() {
        let signal = InterruptSignal::new();
        signal.signal();

        // Next turn starts with a reset
        signal.reset();
        let deadline = Instant::now() + Duration::from_millis(20);
        assert!(!block_on(signal.wait_until(deadline)));
    }

    #[test]
    fn test_late_delivered_press_is_not_credited_to_next_turn() {
        let signal = InterruptSignal::new();

        // First turn: pressed 10 ms in, but the press is delivered late
        let first = Instant::now();
        signal.arm(first);
        let pressed = first + Duration::from_millis(10);
        assert!(!block_on(signal.wait_until(first + Duration::from_millis(20))));

        // Second turn is armed before the first turn's press shows up
        let second = Instant::now();
        signal.arm(second);
        signal.signal_at(pressed);

        assert!(!signal.is_set());
        assert!(!block_on(signal.wait_until(second + Duration::from_millis(30))));
    }

    #[test]
    fn test_stale_stamp_does_not_block_current_reaction() {
        let signal = InterruptSignal::new();
        signal.arm(Instant::from_millis(1000));

        // Written by a setter that checked the previous turn's start
        signal
            .stamp
            .store(Instant::from_millis(900).as_ticks(), Ordering::Release);
        assert_eq!(signal.reacted_at(), None);

        signal.signal_at(Instant::from_millis(1100));
        assert_eq!(signal.reacted_at(), Some(Instant::from_millis(1100)));
    }

    #[test]
    fn test_reaction_before_arming_is_ignored() {
        let signal = InterruptSignal::new();
        signal.arm(Instant::from_millis(500));
        signal.signal_at(Instant::from_millis(499));
        assert!(!signal.is_set());

        signal.signal_at(Instant::from_millis(500));
        assert_eq!(signal.reacted_at(), Some(Instant::from_millis(500)));
    }
}
