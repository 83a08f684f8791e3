//! Turn timing constants and ticker cadence

use embassy_time::Duration;

/// How often a waiting turn checks for a reaction
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on any poll interval used while a turn is running
pub const MAX_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Refractory period between two accepted presses of one button
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Ticker cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerConfig {
    /// Interval between ticks while plenty of time remains
    pub slow_interval: Duration,
    /// Interval between ticks in the final window
    pub fast_interval: Duration,
    /// Remaining time below which the fast cadence is used
    pub fast_window: Duration,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            slow_interval: Duration::from_millis(1000),
            fast_interval: Duration::from_millis(300),
            fast_window: Duration::from_millis(2000),
        }
    }
}
