//! Turn ticker
//!
//! Paces audible urgency cues while a player's turn runs: a slow tick while
//! plenty of time remains, a fast tick in the final window. The ticker only
//! reads the interrupt signal; it never sets or clears it, and it never
//! affects how the turn is scored.
//!
//! The ticker sleeps in slices no longer than the poll interval so it stops
//! promptly once the player reacts. Its future completes no later than the
//! turn's deadline, so awaiting it inside the turn bounds its lifetime to
//! the turn.

use embassy_time::{Instant, Timer};
use tracing::debug;

use crate::config::{TickerConfig, POLL_INTERVAL};
use crate::signal::InterruptSignal;
use crate::traits::{Cue, CuePlayer};

/// Urgency cue driver for one turn at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct Ticker {
    config: TickerConfig,
}

impl Ticker {
    pub fn new(config: TickerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    /// Emit cues until `signal` is set or `deadline` passes
    ///
    /// Returns the number of cues emitted.
    pub async fn run<C: CuePlayer>(
        &self,
        signal: &InterruptSignal,
        deadline: Instant,
        cues: &mut C,
    ) -> u16 {
        let mut ticks: u16 = 0;
        let mut next_tick = Instant::now();

        loop {
            if signal.is_set() {
                break;
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }

            if now >= next_tick {
                let remaining = deadline.saturating_duration_since(now);
                let (cue, interval) = if remaining > self.config.fast_window {
                    (Cue::Tick, self.config.slow_interval)
                } else {
                    (Cue::TickFast, self.config.fast_interval)
                };

                if let Err(e) = cues.play(cue) {
                    debug!("Cue {:?} failed: {:?}", cue, e);
                }
                ticks = ticks.saturating_add(1);
                next_tick = now + interval;
            }

            let wake = next_tick.min(deadline).min(now + POLL_INTERVAL);
            Timer::at(wake).await;
        }

        ticks
    }
}
