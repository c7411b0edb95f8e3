//! Presentation settings
//!
//! Read once at startup from the canvas `data-settings` attribute. Gameplay
//! constants are not configurable; these only affect sound and visuals.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,

    // === Visual Effects ===
    /// Screen shake when a knife collides
    pub screen_shake: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    /// Run the demo player instead of waiting for taps
    pub autoplay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            screen_shake: true,
            show_fps: false,
            autoplay: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Parse settings if present, falling back to defaults on bad input
    pub fn from_optional_json(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings: {:?}", settings);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings ({}), using defaults", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Volume applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"muted": true}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let settings = Settings::from_json(r#"{"master_volume": 4.0, "sfx_volume": -1.0}"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert!(Settings::from_json("{not json").is_err());
        assert_eq!(Settings::from_optional_json(Some("{not json")), Settings::default());
        assert_eq!(Settings::from_optional_json(None), Settings::default());
    }
}
