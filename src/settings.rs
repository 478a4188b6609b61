//! Game settings and tuning
//!
//! Static tunables are loaded once (defaults or a JSON file). The dynamic
//! half is reset at the start of every game and scaled up on every level.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Color;

/// Errors raised while loading a settings file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Values that change during a game session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicSettings {
    pub ship_speed: f32,
    pub projectile_speed: f32,
    pub invader_speed: f32,
    /// `1.0` moves the fleet right, `-1.0` left
    pub fleet_direction: f32,
    /// Points awarded per invader destroyed at the current level
    pub invader_points: u64,
    /// Product of every speedup applied since the last reset
    pub speed_multiplier: f32,
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub bg_color: Color,

    // === Sprites (sizes of externally loaded images) ===
    pub ship_size: Vec2,
    pub invader_size: Vec2,

    // === Ship ===
    pub ship_speed: f32,
    /// Lives at the start of a game
    pub ship_limit: u32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_color: Color,
    pub projectiles_allowed: usize,

    // === Invaders ===
    pub invader_speed: f32,
    pub fleet_drop_speed: f32,
    pub invader_points: u64,

    // === Difficulty scaling ===
    /// How quickly the game speeds up per level
    pub speedup_scale: f32,
    /// How quickly invader point values grow per level
    pub score_scale: f32,

    #[serde(skip)]
    pub dynamic: DynamicSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: 1200.0,
            screen_height: 800.0,
            bg_color: Color::rgb(230, 230, 230),

            ship_size: Vec2::new(60.0, 48.0),
            invader_size: Vec2::new(60.0, 58.0),

            ship_speed: 1.5,
            ship_limit: 3,

            projectile_speed: 1.5,
            projectile_width: 3.0,
            projectile_height: 15.0,
            projectile_color: Color::rgb(60, 60, 60),
            projectiles_allowed: 3,

            invader_speed: 1.0,
            fleet_drop_speed: 10.0,
            invader_points: 50,

            speedup_scale: 1.1,
            score_scale: 1.5,

            dynamic: DynamicSettings::default(),
        };
        settings.reset_dynamic();
        settings
    }
}

impl Settings {
    /// Restore the dynamic values to their base values
    pub fn reset_dynamic(&mut self) {
        self.dynamic = DynamicSettings {
            ship_speed: self.ship_speed,
            projectile_speed: self.projectile_speed,
            invader_speed: self.invader_speed,
            fleet_direction: 1.0,
            invader_points: self.invader_points,
            speed_multiplier: 1.0,
        };
    }

    /// Scale speeds and point values up for the next level
    pub fn increase_speed(&mut self) {
        let d = &mut self.dynamic;
        d.ship_speed *= self.speedup_scale;
        d.projectile_speed *= self.speedup_scale;
        d.invader_speed *= self.speedup_scale;
        d.speed_multiplier *= self.speedup_scale;
        d.invader_points = (d.invader_points as f64 * self.score_scale as f64).floor() as u64;
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Parse and validate settings from JSON (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        settings.reset_dynamic();
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return invalid("screen", "dimensions must be positive");
        }
        if !(self.ship_size.x > 0.0 && self.ship_size.y > 0.0) {
            return invalid("ship_size", "dimensions must be positive");
        }
        if !(self.invader_size.x > 0.0 && self.invader_size.y > 0.0) {
            return invalid("invader_size", "dimensions must be positive");
        }
        if !(self.projectile_width > 0.0 && self.projectile_height > 0.0) {
            return invalid("projectile", "dimensions must be positive");
        }
        if self.ship_speed < 0.0 || self.projectile_speed < 0.0 || self.invader_speed < 0.0 {
            return invalid("speed", "speeds must not be negative");
        }
        if self.fleet_drop_speed < 0.0 {
            return invalid("fleet_drop_speed", "must not be negative");
        }
        if self.speedup_scale <= 1.0 {
            return invalid("speedup_scale", "must be greater than 1");
        }
        if self.score_scale < 1.0 {
            return invalid("score_scale", "must be at least 1");
        }
        if self.projectiles_allowed == 0 {
            return invalid("projectiles_allowed", "must allow at least one projectile");
        }
        if self.ship_limit == 0 {
            return invalid("ship_limit", "must start with at least one life");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.dynamic.fleet_direction, 1.0);
        assert_eq!(settings.dynamic.invader_points, 50);
        assert_eq!(settings.dynamic.speed_multiplier, 1.0);
    }

    #[test]
    fn test_increase_speed_scales_everything() {
        let mut settings = Settings::default();
        settings.increase_speed();

        let d = &settings.dynamic;
        assert!((d.ship_speed - 1.65).abs() < 1e-5);
        assert!((d.projectile_speed - 1.65).abs() < 1e-5);
        assert!((d.invader_speed - 1.1).abs() < 1e-5);
        assert!((d.speed_multiplier - 1.1).abs() < 1e-5);
        assert_eq!(d.invader_points, 75);

        settings.increase_speed();
        assert_eq!(settings.dynamic.invader_points, 112);
    }

    #[test]
    fn test_reset_restores_base_values() {
        let mut settings = Settings::default();
        settings.increase_speed();
        settings.increase_speed();
        settings.dynamic.fleet_direction = -1.0;

        settings.reset_dynamic();
        assert_eq!(settings.dynamic.ship_speed, settings.ship_speed);
        assert_eq!(settings.dynamic.invader_speed, settings.invader_speed);
        assert_eq!(settings.dynamic.fleet_direction, 1.0);
        assert_eq!(settings.dynamic.invader_points, settings.invader_points);
    }

    #[test]
    fn test_speeds_never_decrease_within_a_session() {
        let mut settings = Settings::default();
        let mut last = settings.dynamic.clone();
        for _ in 0..10 {
            settings.increase_speed();
            assert!(settings.dynamic.ship_speed > last.ship_speed);
            assert!(settings.dynamic.invader_speed > last.invader_speed);
            assert!(settings.dynamic.invader_points >= last.invader_points);
            last = settings.dynamic.clone();
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{ "screen_width": 800, "screen_height": 600, "invader_size": [40, 25] }"#,
        )
        .unwrap();
        assert_eq!(settings.screen_width, 800.0);
        assert_eq!(settings.invader_size, Vec2::new(40.0, 25.0));
        assert_eq!(settings.projectiles_allowed, 3);
        assert_eq!(settings.dynamic.invader_speed, 1.0);
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        let err = Settings::from_json(r#"{ "speedup_scale": 0.9 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "speedup_scale",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "projectiles_allowed": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
