//! Round engine
//!
//! Shows the round's prompt, then gives every player in roster order one
//! timed turn. Turns are strictly sequential: a turn's wait and its ticker
//! both finish before the next player's turn starts.

use embassy_futures::join::join;
use embassy_time::{Duration, Instant};
use tracing::{debug, warn};

use crate::game::{PlayerId, Roster};
use crate::signal::InterruptSignal;
use crate::ticker::Ticker;
use crate::traits::{Cue, CuePlayer, MatchObserver, Renderer, TurnOutcome};

/// Tally of one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Turns won by reacting in time
    pub reacted: u8,
    /// Turns lost to the deadline
    pub timed_out: u8,
}

/// Runs rounds against a shared interrupt signal
pub struct RoundEngine<'s, R, C, O> {
    signal: &'s InterruptSignal,
    renderer: R,
    cues: C,
    observer: O,
    ticker: Option<Ticker>,
}

impl<'s, R, C, O> RoundEngine<'s, R, C, O>
where
    R: Renderer,
    C: CuePlayer,
    O: MatchObserver,
{
    /// Create a round engine without a ticker
    pub fn new(signal: &'s InterruptSignal, renderer: R, cues: C, observer: O) -> Self {
        Self {
            signal,
            renderer,
            cues,
            observer,
            ticker: None,
        }
    }

    /// Pace urgency cues during every turn
    pub fn with_ticker(mut self, ticker: Ticker) -> Self {
        self.ticker = Some(ticker);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Run one round over every entry of `roster`
    ///
    /// Lives are updated in place; the roster keeps its length and order.
    pub async fn run_round(
        &mut self,
        roster: &mut Roster,
        deadline: Duration,
        prompt: &str,
    ) -> RoundSummary {
        self.show_prompt(prompt);

        let mut summary = RoundSummary::default();

        for index in 0..roster.len() {
            let Some(player) = roster.get(index).copied() else {
                break;
            };

            let outcome = self.run_turn(player.id, deadline).await;
            let lives = match outcome {
                TurnOutcome::Reacted => {
                    summary.reacted += 1;
                    player.lives
                }
                TurnOutcome::TimedOut => {
                    summary.timed_out += 1;
                    let lives = roster.penalize(index);
                    if let Err(e) = self.cues.play(Cue::Penalty) {
                        debug!("Penalty cue failed: {:?}", e);
                    }
                    lives
                }
            };

            debug!("{} {:?}, {} lives left", player.id, outcome, lives);
            self.observer.turn_finished(player.id, outcome, lives);
        }

        summary
    }

    /// One player's timed turn
    async fn run_turn(&mut self, player: PlayerId, deadline: Duration) -> TurnOutcome {
        let signal = self.signal;

        // Arm the signal before anyone can react to this turn
        let start = Instant::now();
        signal.arm(start);
        let turn_deadline = start + deadline;
        self.observer.turn_started(player, deadline);

        let reacted = match self.ticker {
            Some(ticker) => {
                let (reacted, _ticks) = join(
                    signal.wait_until(turn_deadline),
                    ticker.run(signal, turn_deadline, &mut self.cues),
                )
                .await;
                reacted
            }
            None => signal.wait_until(turn_deadline).await,
        };

        if reacted {
            TurnOutcome::Reacted
        } else {
            TurnOutcome::TimedOut
        }
    }

    /// Render the prompt, falling back to a blank screen
    fn show_prompt(&mut self, prompt: &str) {
        if let Err(e) = self.renderer.render_prompt(prompt) {
            warn!("Prompt {:?} not rendered ({:?}), clearing display", prompt, e);
            if let Err(e) = self.renderer.render_blank() {
                warn!("Display clear failed: {:?}", e);
            }
        }
    }
}
