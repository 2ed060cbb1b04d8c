//! Kiosk settings
//!
//! Operator-tunable timings, geometry and the prize table. Persisted as JSON
//! in LocalStorage on the web; natively the defaults are used.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::kiosk::Kiosk;
use crate::sim::GameConfig;
use crate::wheel::{PrizeSegment, SpinConfig, Wheel, default_prizes};

/// Kiosk settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskSettings {
    // === Session ===
    /// Inactivity before returning to the welcome screen (ms)
    pub idle_timeout_ms: f64,
    /// Go straight from confirmation to paddle-ball
    pub skip_game_selection: bool,

    // === Paddle-ball ===
    pub win_score: u8,
    pub point_delay_ms: f64,
    pub win_transition_delay_ms: f64,
    pub ball_speed: f32,
    pub ball_radius: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_inset: f32,

    // === Prize wheel ===
    pub spin_duration_ms: f64,
    pub min_full_rotations: u32,
    pub max_full_rotations: u32,
    pub prizes: Vec<PrizeSegment>,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            idle_timeout_ms: IDLE_TIMEOUT_MS,
            skip_game_selection: true,

            win_score: WIN_SCORE,
            point_delay_ms: POINT_DELAY_MS,
            win_transition_delay_ms: WIN_TRANSITION_DELAY_MS,
            ball_speed: BALL_SPEED,
            ball_radius: BALL_RADIUS,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,

            spin_duration_ms: SPIN_DURATION_MS,
            min_full_rotations: MIN_FULL_ROTATIONS,
            max_full_rotations: MAX_FULL_ROTATIONS,
            prizes: default_prizes(),
        }
    }
}

impl KioskSettings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            paddle_width: self.paddle_width,
            paddle_height: self.paddle_height,
            paddle_inset: self.paddle_inset,
            ball_radius: self.ball_radius,
            ball_speed: self.ball_speed,
            win_score: self.win_score.max(1),
            point_delay_ms: self.point_delay_ms.max(0.0),
            win_transition_delay_ms: self.win_transition_delay_ms.max(0.0),
            ..GameConfig::default()
        }
    }

    /// Spin timing; an inverted rotation range collapses to its minimum
    pub fn spin_config(&self) -> SpinConfig {
        SpinConfig {
            duration_ms: self.spin_duration_ms.max(0.0),
            min_full_rotations: self.min_full_rotations,
            max_full_rotations: self.max_full_rotations.max(self.min_full_rotations),
        }
    }

    /// Prize wheel; falls back to the default prizes when the table is empty
    pub fn wheel(&self) -> Wheel {
        Wheel::new(self.prizes.clone()).unwrap_or_else(|| {
            log::warn!("Empty prize table, using default prizes");
            Wheel::default()
        })
    }

    pub fn kiosk(&self) -> Kiosk {
        Kiosk::new(self.idle_timeout_ms, self.skip_game_selection)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "kiosk_arcade_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = KioskSettings::default();
        assert_eq!(settings.game_config(), GameConfig::default());
        assert_eq!(settings.spin_config(), SpinConfig::default());
        assert_eq!(settings.wheel().len(), 8);
        assert_eq!(settings.idle_timeout_ms, 60_000.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = KioskSettings::from_json(r#"{"win_score": 5, "skip_game_selection": false}"#)
            .expect("valid json");
        assert_eq!(settings.win_score, 5);
        assert!(!settings.skip_game_selection);
        assert_eq!(settings.point_delay_ms, POINT_DELAY_MS);
        assert_eq!(settings.prizes.len(), 8);
    }

    #[test]
    fn test_custom_prizes() {
        let json = r##"{"prizes": [{"label": "Sticker", "color": "#000000"}, {"label": "Pen", "color": "#ffffff"}]}"##;
        let settings = KioskSettings::from_json(json).expect("valid json");
        let wheel = settings.wheel();
        assert_eq!(wheel.len(), 2);
        assert_eq!(wheel.get(1).map(|p| p.label.as_str()), Some("Pen"));
    }

    #[test]
    fn test_empty_prizes_fall_back() {
        let settings = KioskSettings::from_json(r#"{"prizes": []}"#).expect("valid json");
        assert_eq!(settings.wheel(), Wheel::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(KioskSettings::from_json("{not json").is_err());
        assert!(KioskSettings::from_json(r#"{"win_score": "three"}"#).is_err());
    }

    #[test]
    fn test_inverted_rotation_range() {
        let settings = KioskSettings {
            min_full_rotations: 5,
            max_full_rotations: 2,
            ..KioskSettings::default()
        };
        let spin = settings.spin_config();
        assert_eq!((spin.min_full_rotations, spin.max_full_rotations), (5, 5));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = KioskSettings::default();
        let json = settings.to_json().expect("serializable");
        assert_eq!(KioskSettings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_kiosk_from_settings() {
        let settings = KioskSettings {
            skip_game_selection: false,
            ..KioskSettings::default()
        };
        let mut kiosk = settings.kiosk();
        kiosk.transition(crate::kiosk::KioskAction::TapToPlay, 0.0);
        kiosk.transition(crate::kiosk::KioskAction::Confirm, 0.0);
        assert_eq!(kiosk.screen(), crate::kiosk::Screen::GameSelection);
    }
}
