//! Audio cues
//!
//! Plays the tick, fast tick and penalty sounds through kira. A missing
//! audio device or sound file never stops the game: the launcher carries on
//! with fewer (or no) sounds and says so once at startup.

use std::path::Path;

use kira::manager::backend::DefaultBackend;
use kira::manager::{AudioManager, AudioManagerSettings};
use kira::sound::static_sound::StaticSoundData;
use ngrush_core::traits::{Cue, CueError, CuePlayer};
use tracing::{info, warn};

use crate::config::AudioSettings;

const CUES: [Cue; 3] = [Cue::Tick, Cue::TickFast, Cue::Penalty];

fn slot(cue: Cue) -> usize {
    match cue {
        Cue::Tick => 0,
        Cue::TickFast => 1,
        Cue::Penalty => 2,
    }
}

/// Cue player backed by the system audio device
pub struct AudioCues {
    manager: Option<AudioManager<DefaultBackend>>,
    sounds: [Option<StaticSoundData>; 3],
}

impl AudioCues {
    /// A player that never makes a sound
    pub fn silent() -> Self {
        Self {
            manager: None,
            sounds: [None, None, None],
        }
    }

    /// Open the audio device and load the configured sounds
    pub fn load(settings: &AudioSettings) -> Self {
        if !settings.enabled {
            info!("Audio disabled");
            return Self::silent();
        }

        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(manager) => manager,
            Err(e) => {
                warn!("No audio device ({}), playing silently", e);
                return Self::silent();
            }
        };

        let mut sounds = [None, None, None];
        for cue in CUES {
            let path = match cue {
                Cue::Tick => &settings.tick,
                Cue::TickFast => &settings.tick_fast,
                Cue::Penalty => &settings.penalty,
            };
            sounds[slot(cue)] = load_sound(path);
        }

        let cues = Self {
            manager: Some(manager),
            sounds,
        };
        if !cues.is_audible() {
            warn!("No sounds loaded, playing silently");
        }
        cues
    }

    /// Whether sounds can be heard at all
    pub fn is_audible(&self) -> bool {
        self.manager.is_some() && self.sounds.iter().any(Option::is_some)
    }
}

fn load_sound(path: &Path) -> Option<StaticSoundData> {
    match StaticSoundData::from_file(path) {
        Ok(sound) => Some(sound),
        Err(e) => {
            warn!("Sound {} unavailable: {}", path.display(), e);
            None
        }
    }
}

impl CuePlayer for AudioCues {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        let Some(manager) = self.manager.as_mut() else {
            return Ok(());
        };
        let Some(sound) = &self.sounds[slot(cue)] else {
            return Err(CueError::Missing);
        };
        manager
            .play(sound.clone())
            .map(|_| ())
            .map_err(|_| CueError::Playback)
    }
}
