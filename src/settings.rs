//! Player preferences
//!
//! Persisted separately from records. The engine only reads the two feedback
//! flags; volumes are carried for the audio collaborator.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle bursts on hits
    pub visual_effects: bool,
    /// Vibration on hits and game over
    pub haptics: bool,
    /// Music volume (0 - 100)
    pub music_volume: u8,
    /// Sound effects volume (0 - 100)
    pub effects_volume: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visual_effects: true,
            haptics: true,
            music_volume: 50,
            effects_volume: 50,
        }
    }
}

impl Settings {
    /// Set music volume, clamped to 0 - 100
    pub fn set_music_volume(&mut self, volume: u8) {
        self.music_volume = volume.min(100);
    }

    /// Set effects volume, clamped to 0 - 100
    pub fn set_effects_volume(&mut self, volume: u8) {
        self.effects_volume = volume.min(100);
    }

    /// Sampler gain in decibels for the current music volume (-10 dB .. 0 dB)
    pub fn music_gain_db(&self) -> f32 {
        -10.0 + f32::from(self.music_volume.min(100)) / 100.0 * 10.0
    }

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let mut settings: Settings = persistence::load_json_or_default(path);
        settings.set_music_volume(settings.music_volume);
        settings.set_effects_volume(settings.effects_volume);
        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamp() {
        let mut settings = Settings::default();
        settings.set_music_volume(250);
        settings.set_effects_volume(30);
        assert_eq!(settings.music_volume, 100);
        assert_eq!(settings.effects_volume, 30);
    }

    #[test]
    fn test_music_gain_range() {
        let mut settings = Settings::default();
        settings.set_music_volume(0);
        assert_eq!(settings.music_gain_db(), -10.0);
        settings.set_music_volume(100);
        assert_eq!(settings.music_gain_db(), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"haptics": false}"#).unwrap();
        assert!(!settings.haptics);
        assert!(settings.visual_effects);
        assert_eq!(settings.music_volume, 50);
    }
}
