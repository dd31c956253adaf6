//! Startup configuration
//!
//! Read once at launch from a JSON file and two environment variables.
//! Nothing here is ever written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::theme::ThemeMode;

/// Path of the JSON config file, overrides the platform config dir.
pub const CONFIG_ENV: &str = "KALKULACKA_CONFIG";
/// `light` or `dark`, overrides the file.
pub const THEME_ENV: &str = "KALKULACKA_THEME";

const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown theme `{0}` (expected light or dark)")]
    InvalidTheme(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Particle effect tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub enabled: bool,
    pub particles_per_burst: usize,
    /// Downward acceleration in points per second squared.
    pub gravity: f32,
    /// Fraction of vertical speed kept after hitting the floor.
    pub bounce: f32,
    /// Fraction of speed lost per second.
    pub air_resistance: f32,
    /// Opacity lost per second.
    pub fade_rate: f32,
    /// Seconds before a particle is dropped regardless of opacity.
    pub lifetime: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            particles_per_burst: 14,
            gravity: 900.0,
            bounce: 0.45,
            air_resistance: 0.6,
            fade_rate: 1.1,
            lifetime: 2.0,
        }
    }
}

impl EffectsConfig {
    /// Clamp every field into a range the physics can handle.
    pub fn sanitized(mut self) -> Self {
        self.particles_per_burst = self.particles_per_burst.min(200);
        self.gravity = finite_or(self.gravity, 900.0).clamp(0.0, 10_000.0);
        self.bounce = finite_or(self.bounce, 0.45).clamp(0.0, 1.0);
        self.air_resistance = finite_or(self.air_resistance, 0.6).clamp(0.0, 0.99);
        self.fade_rate = finite_or(self.fade_rate, 1.1).clamp(0.05, 20.0);
        self.lifetime = finite_or(self.lifetime, 2.0).clamp(0.1, 30.0);
        self
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeMode,
    pub effects: EffectsConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Apply a `KALKULACKA_THEME` style override.
    pub fn with_theme_override(mut self, value: Option<&str>) -> Result<Self> {
        if let Some(value) = value {
            self.theme = value
                .parse()
                .map_err(ConfigError::InvalidTheme)?;
        }
        Ok(self)
    }

    fn sanitized(mut self) -> Self {
        self.effects = self.effects.sanitized();
        self
    }

    /// Default location of the config file for this platform.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kalkulacka")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Resolve the config from the environment. Never fails: problems are
    /// logged and defaults used instead.
    pub fn discover() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let path = explicit.clone().or_else(Self::default_path);

        let config = match path {
            Some(path) if explicit.is_some() || path.exists() => match Self::load(&path) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring config file");
                    Self::default()
                }
            },
            _ => {
                debug!("no config file, using defaults");
                Self::default()
            }
        };

        let theme = std::env::var(THEME_ENV).ok();
        match config.clone().with_theme_override(theme.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring {}", THEME_ENV);
                config
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"theme": "dark", "effects": {"bounce": 0.8}}"#).unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.effects.bounce, 0.8);
        assert_eq!(config.effects.gravity, EffectsConfig::default().gravity);
        assert!(config.effects.enabled);
    }

    #[test]
    fn test_bad_theme_rejected() {
        let err = Config::from_json(r#"{"theme": "sepia"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Config::from_json("{theme"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_effects_clamped() {
        let config = Config::from_json(
            r#"{"effects": {"bounce": 3.0, "air_resistance": -1.0, "particles_per_burst": 5000, "lifetime": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(config.effects.bounce, 1.0);
        assert_eq!(config.effects.air_resistance, 0.0);
        assert_eq!(config.effects.particles_per_burst, 200);
        assert_eq!(config.effects.lifetime, 0.1);
    }

    #[test]
    fn test_theme_override() {
        let config = Config::default().with_theme_override(Some("dark")).unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);

        let config = Config::default().with_theme_override(None).unwrap();
        assert_eq!(config.theme, ThemeMode::Light);

        let err = Config::default().with_theme_override(Some("blue")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTheme(ref t) if t == "blue"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/kalkulacka/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
