//! Input routing
//!
//! Keyboard lines and button edges become either a reaction for the running
//! turn or a button press for the launcher.
//!
//! The keyboard is read from stdin on a dedicated thread. During a match
//! any line (Enter on its own is enough) counts as the current player's
//! reaction. Between matches the first character of a line selects a
//! button: `a`, `b` or `c`.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use ngrush_core::input::{Button, Debouncer};
use ngrush_core::InterruptSignal;
use tracing::{debug, trace};

use crate::channels::{InputChannel, InputEvent, INPUT_CHANNEL, MATCH_ACTIVE, SIGNAL};

/// Button that reacts during a match on the button panel
pub const REACTION_BUTTON: Button = Button::A;

/// What a single input turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// Reaction recorded on the interrupt signal
    Reaction,
    /// Button press for the launcher
    Button(Button),
    /// Bounce or unrecognised input
    Ignored,
}

/// Turns input lines and button edges into reactions or button presses
pub struct InputRouter {
    reactions: Debouncer,
    buttons: Debouncer,
}

impl InputRouter {
    pub fn new(debounce: Duration) -> Self {
        Self {
            reactions: Debouncer::new(debounce),
            buttons: Debouncer::new(debounce),
        }
    }

    /// Classify a keyboard line received at `now`
    pub fn route(&mut self, line: &str, now: Instant, match_active: bool) -> Routed {
        if match_active {
            return self.reaction(now);
        }

        match line.trim().chars().next().and_then(Button::from_char) {
            Some(button) => self.route_button(button, now, false),
            None => Routed::Ignored,
        }
    }

    /// Classify a button edge seen at `now`
    ///
    /// During a match only the reaction button counts.
    pub fn route_button(&mut self, button: Button, now: Instant, match_active: bool) -> Routed {
        match (match_active, button) {
            (true, REACTION_BUTTON) => self.reaction(now),
            (true, _) => Routed::Ignored,
            (false, button) => self.press(button, now),
        }
    }

    fn reaction(&mut self, now: Instant) -> Routed {
        if self.reactions.accept(now) {
            Routed::Reaction
        } else {
            Routed::Ignored
        }
    }

    fn press(&mut self, button: Button, now: Instant) -> Routed {
        if self.buttons.accept(now) {
            Routed::Button(button)
        } else {
            Routed::Ignored
        }
    }
}

/// Where routed input ends up
pub struct InputSink<'a> {
    signal: &'a InterruptSignal,
    channel: &'a InputChannel,
    match_active: &'a AtomicBool,
}

impl<'a> InputSink<'a> {
    pub fn new(
        signal: &'a InterruptSignal,
        channel: &'a InputChannel,
        match_active: &'a AtomicBool,
    ) -> Self {
        Self {
            signal,
            channel,
            match_active,
        }
    }

    pub fn match_active(&self) -> bool {
        self.match_active.load(Ordering::Acquire)
    }

    /// Hand a routed input over; button presses wait for room in the queue
    pub fn deliver(&self, routed: Routed, now: Instant) {
        match routed {
            Routed::Reaction => {
                self.signal.signal_at(now);
                trace!("Reaction at {} ms", now.as_millis());
            }
            Routed::Button(button) => {
                block_on(self.channel.send(InputEvent::Button(button)));
                trace!("Button {} queued", button.label());
            }
            Routed::Ignored => {}
        }
    }

    /// Tell the launcher nothing more will arrive
    pub fn close(&self) {
        block_on(self.channel.send(InputEvent::Closed));
    }
}

impl InputSink<'static> {
    /// The launcher's signal and input queue
    pub fn shared() -> Self {
        Self::new(&SIGNAL, &INPUT_CHANNEL, &MATCH_ACTIVE)
    }
}

/// Start the stdin reader thread
pub fn spawn_input_reader(debounce: Duration) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("ngrush-input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            pump_lines(stdin.lock(), InputRouter::new(debounce), &InputSink::shared());
        })
}

/// Route every line of `reader`, then close the sink
fn pump_lines<R: BufRead>(reader: R, mut router: InputRouter, sink: &InputSink<'_>) {
    for line in reader.lines() {
        let Ok(line) = line else { break };
        let now = Instant::now();
        let routed = router.route(&line, now, sink.match_active());
        sink.deliver(routed, now);
    }

    debug!("Input closed");
    sink.close();
}
