//! Launcher controller
//!
//! The controller is the loop around matches that:
//! - Shows the settings menu and reads button presses
//! - Builds and runs a match with the chosen settings
//! - Shows the result and the post-game choice
//! - Powers the display down on exit

use embassy_time::Duration;
use ngrush_core::config::MatchConfig;
use ngrush_core::engine::{MatchEngine, MatchOutcome, RoundEngine};
use ngrush_core::game::PlayerId;
use ngrush_core::menu::{MatchSettings, MenuStep, PostGameAction, SettingsMenu};
use ngrush_core::state::{Event, State};
use ngrush_core::traits::{MatchObserver, PromptPools, Renderer, TurnOutcome};
use ngrush_core::Ticker;
use ngrush_display::{DisplayBackend, OledRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::audio::AudioCues;
use crate::channels::{self, InputEvent, INPUT_CHANNEL, SIGNAL};
use crate::config::{AppConfig, PromptSet};
use crate::error::AppError;

/// Tells the players whose turn it is
struct TurnAnnouncer;

impl MatchObserver for TurnAnnouncer {
    fn turn_started(&mut self, player: PlayerId, deadline: Duration) {
        info!(
            "{}: press Enter! ({:.1} s)",
            player,
            deadline.as_millis() as f32 / 1000.0
        );
    }

    fn turn_finished(&mut self, player: PlayerId, outcome: TurnOutcome, lives: u8) {
        match outcome {
            TurnOutcome::Reacted => info!("{} made it", player),
            TurnOutcome::TimedOut => info!("{} too slow, {} lives left", player, lives),
        }
    }
}

/// Top line of the result screen
pub fn result_line(outcome: &MatchOutcome) -> String {
    match outcome.winner {
        Some(winner) => format!("{} wins", winner),
        None => "No winner".to_string(),
    }
}

/// Launcher state and collaborators
pub struct Launcher<B> {
    config: AppConfig,
    renderer: OledRenderer<B>,
    cues: AudioCues,
    prompts: PromptSet,
    rng: StdRng,
    state: State,
    menu: SettingsMenu,
    settings: MatchSettings,
}

impl<B: DisplayBackend> Launcher<B> {
    pub fn new(config: AppConfig, backend: B, cues: AudioCues, prompts: PromptSet) -> Self {
        let settings = config.game.settings();
        let renderer = OledRenderer::new(backend, config.display.rotate);

        Self {
            renderer,
            cues,
            prompts,
            rng: StdRng::from_entropy(),
            state: State::default(),
            menu: SettingsMenu::new(settings),
            settings,
            config,
        }
    }

    /// Play one match and exit
    pub async fn run_once(&mut self, config: MatchConfig) -> Result<MatchOutcome, AppError> {
        let outcome = self.play(config).await?;
        self.show(&result_line(&outcome), "Game Over");
        self.shutdown();
        Ok(outcome)
    }

    /// Menu, match and post-game loop until powered off
    pub async fn run(&mut self) -> Result<(), AppError> {
        while !self.state.is_terminal() {
            let event = match self.state {
                State::Menu => self.menu_event().await,
                State::Playing => {
                    let config = self.match_config()?;
                    let outcome = self.play(config).await?;
                    self.show(&result_line(&outcome), PostGameAction::HINT);
                    Event::MatchFinished
                }
                State::GameOver => self.post_game_event().await,
                State::Off => break,
            };

            let next = self.state.transition(event);
            debug!("{:?} --{:?}--> {:?}", self.state, event, next);
            self.state = next;
        }

        self.shutdown();
        Ok(())
    }

    /// Match configuration for the current settings
    fn match_config(&self) -> Result<MatchConfig, AppError> {
        let config = self
            .settings
            .match_config()?
            .with_loss_threshold(self.config.game.loss_threshold)?;
        Ok(config)
    }

    /// Run a match to completion
    async fn play(&mut self, config: MatchConfig) -> Result<MatchOutcome, AppError> {
        let pools = PromptPools::new(
            self.prompts.easy.as_slice(),
            self.prompts.hard.as_slice(),
            &mut self.rng,
        )?;

        let mut rounds = RoundEngine::new(&SIGNAL, &mut self.renderer, &mut self.cues, TurnAnnouncer);
        if let Some(cadence) = self.config.ticker.cadence() {
            rounds = rounds.with_ticker(Ticker::new(cadence));
        }
        let mut engine = MatchEngine::new(config, rounds, pools);

        channels::drain_input();
        channels::set_match_active(true);
        let outcome = engine.run().await;
        channels::set_match_active(false);

        Ok(outcome)
    }

    /// Walk the settings menu until it is confirmed or input ends
    async fn menu_event(&mut self) -> Event {
        channels::drain_input();

        loop {
            let title = self.menu.title();
            let value = self.menu.value();
            self.show(title, &value);

            match INPUT_CHANNEL.receive().await {
                InputEvent::Closed => return Event::PowerOff,
                InputEvent::Button(button) => {
                    if let MenuStep::Done(settings) = self.menu.handle(button) {
                        info!(
                            "Settings: {} speed, {} players, {} lives",
                            settings.speed.label(),
                            settings.players,
                            settings.lives
                        );
                        self.settings = settings;
                        return Event::SettingsConfirmed;
                    }
                }
            }
        }
    }

    /// Wait for the post-game choice
    async fn post_game_event(&mut self) -> Event {
        channels::drain_input();

        match INPUT_CHANNEL.receive().await {
            InputEvent::Closed => Event::PowerOff,
            InputEvent::Button(button) => PostGameAction::from_button(button).event(),
        }
    }

    fn show(&mut self, top: &str, bottom: &str) {
        if let Err(e) = self.renderer.render_lines(top, bottom) {
            warn!("Display update failed: {:?}", e);
        }
    }

    fn shutdown(&mut self) {
        info!("Powering off");
        if let Err(e) = self.renderer.power_off() {
            warn!("Display power off failed: {}", e);
        }
    }
}
