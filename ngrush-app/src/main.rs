//! ngrush - beat the ngram before time runs out
//!
//! Launcher binary: settings menu, match loop and post-game choice. Each
//! turn races the current player's reaction against a deadline that shrinks
//! as players are knocked out.
//!
//! Input comes from the keyboard (Enter to react, `a`/`b`/`c` for the menu
//! buttons) and frames are drawn on the terminal. Builds with the `rpi`
//! feature can drive the SH1106 panel and the GPIO buttons instead.

mod audio;
mod channels;
mod cli;
mod config;
mod controller;
mod error;
#[cfg(feature = "rpi")]
mod hardware;
mod tasks;
mod terminal;

use clap::Parser;
use embassy_executor::Spawner;
use ngrush_display::DisplayBackend;
use tracing::{error, info};
use tracing_subscriber::filter::EnvFilter;

use crate::audio::AudioCues;
use crate::cli::Cli;
use crate::config::{AppConfig, DisplayKind, PromptSet};
use crate::controller::Launcher;
use crate::error::AppError;
use crate::terminal::{NullBackend, TerminalBackend};

/// Initialize logging to stderr, `RUST_LOG` overriding the default level
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let cli = Cli::parse();
    init_logging();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), AppError> {
    info!("ngrush starting...");

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.check_build()?;
    let one_shot = cli.one_shot(&config)?;

    let prompts = PromptSet::load(&config.prompts)?;
    let cues = AudioCues::load(&config.audio);

    #[cfg(feature = "rpi")]
    let _buttons = match config.input.source {
        config::loader::InputSource::Gpio => Some(hardware::watch_buttons(
            &config.gpio,
            config.input.debounce(),
        )?),
        config::loader::InputSource::Keyboard => {
            start_keyboard(&config)?;
            None
        }
    };
    #[cfg(not(feature = "rpi"))]
    start_keyboard(&config)?;

    match config.display.backend {
        DisplayKind::Terminal => {
            launch(config, TerminalBackend::stdout(), cues, prompts, one_shot).await
        }
        DisplayKind::Headless => launch(config, NullBackend, cues, prompts, one_shot).await,
        #[cfg(feature = "rpi")]
        DisplayKind::Sh1106 => {
            let panel = hardware::open_display(&config.gpio)?;
            launch(config, panel, cues, prompts, one_shot).await
        }
        #[cfg(not(feature = "rpi"))]
        DisplayKind::Sh1106 => Err(AppError::Unsupported("the sh1106 display")),
    }
}

fn start_keyboard(config: &AppConfig) -> Result<(), AppError> {
    tasks::spawn_input_reader(config.input.debounce()).map_err(AppError::Input)?;
    info!("Enter reacts during a match; a/b/c are the menu buttons");
    Ok(())
}

async fn launch<B: DisplayBackend>(
    config: AppConfig,
    backend: B,
    cues: AudioCues,
    prompts: PromptSet,
    one_shot: Option<ngrush_core::config::MatchConfig>,
) -> Result<(), AppError> {
    let mut launcher = Launcher::new(config, backend, cues, prompts);

    match one_shot {
        Some(config) => launcher.run_once(config).await.map(|_| ()),
        None => launcher.run().await,
    }
}
