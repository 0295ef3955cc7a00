//! Sound effect identifiers and the output they are sent to.

use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Food,
    FoodBig,
    Teleport,
    MovementGrowing,
    Collision,
    Ui,
    UiConfirm,
    VolumeUp,
    VolumeDown,
}

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Food => "sound_food",
            SoundEffect::FoodBig => "sound_food_big",
            SoundEffect::Teleport => "sound_teleport",
            SoundEffect::MovementGrowing => "sound_movement_growing",
            SoundEffect::Collision => "sound_collision",
            SoundEffect::Ui => "sound_ui",
            SoundEffect::UiConfirm => "sound_ui_confirm",
            SoundEffect::VolumeUp => "sound_volume_up",
            SoundEffect::VolumeDown => "sound_volume_down",
        }
    }
}

/// Fire-and-forget audio output. Volumes range from 0 to 100.
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect);
    fn set_effects_volume(&mut self, volume: u8);
    fn set_music_volume(&mut self, volume: u8);
    fn start_music(&mut self);
}

/// Audio output for terminals without a sound device: effects are written to
/// the log, muted channels are dropped.
#[derive(Debug, Default)]
pub struct LogAudio {
    effects_volume: u8,
    music_volume: u8,
    music_playing: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for LogAudio {
    fn play_effect(&mut self, effect: SoundEffect) {
        if self.effects_volume > 0 {
            debug!("play {} at volume {}", effect.name(), self.effects_volume);
        }
    }

    fn set_effects_volume(&mut self, volume: u8) {
        self.effects_volume = volume.min(100);
    }

    fn set_music_volume(&mut self, volume: u8) {
        self.music_volume = volume.min(100);
        if self.music_playing {
            debug!("music volume {}", self.music_volume);
        }
    }

    fn start_music(&mut self) {
        if !self.music_playing {
            self.music_playing = true;
            info!("soundtrack started at volume {}", self.music_volume);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_names() {
        assert_eq!(SoundEffect::FoodBig.name(), "sound_food_big");
        assert_eq!(SoundEffect::UiConfirm.name(), "sound_ui_confirm");
    }

    #[test]
    fn test_log_audio_clamps_volume() {
        let mut audio = LogAudio::new();
        audio.set_effects_volume(250);
        audio.set_music_volume(30);
        assert_eq!(audio.effects_volume, 100);
        assert_eq!(audio.music_volume, 30);

        audio.start_music();
        assert!(audio.music_playing);
    }
}
