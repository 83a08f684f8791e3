//! Press debouncing

use embassy_time::{Duration, Instant};

use crate::config::DEFAULT_DEBOUNCE;

/// Drops presses that arrive within the refractory period of the last
/// accepted one
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    refractory: Duration,
    last: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(refractory: Duration) -> Self {
        Self {
            refractory,
            last: None,
        }
    }

    /// Whether a press at `now` should be acted on
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.refractory {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_accepted() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.accept(Instant::from_millis(5)));
    }

    #[test]
    fn test_bounce_rejected() {
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        assert!(debouncer.accept(Instant::from_millis(1000)));
        assert!(!debouncer.accept(Instant::from_millis(1050)));
        assert!(!debouncer.accept(Instant::from_millis(1199)));
        assert!(debouncer.accept(Instant::from_millis(1200)));
    }

    #[test]
    fn test_rejected_press_does_not_extend_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        assert!(debouncer.accept(Instant::from_millis(0)));
        assert!(!debouncer.accept(Instant::from_millis(150)));
        // Measured from the accepted press, not the bounce
        assert!(debouncer.accept(Instant::from_millis(210)));
    }
}
