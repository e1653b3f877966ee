//! Simulation configuration (JSON)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fading::FadeSettings;
use crate::logger;
use crate::movement::MovementConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Полная конфигурация симуляции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub tick_hz: f64,
    /// Seed для DeterministicRng
    pub seed: u64,
    pub character: MovementConfig,
    pub fade: FadeSettings,
    /// None → pixel snap выключен
    pub pixels_per_unit: Option<f32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            character: MovementConfig::default(),
            fade: FadeSettings::default(),
            pixels_per_unit: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load из файла, при ошибке — warning в лог и defaults
    pub fn load_or_default(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        Self::load(path).unwrap_or_else(|err| {
            logger::log_warning(&format!("Config '{}' rejected ({}), using defaults", path, err));
            Self::default()
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz > 0.0) {
            return Err(ConfigError::Invalid(format!("tick_hz must be > 0, got {}", self.tick_hz)));
        }
        if !(self.character.speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "character.speed must be > 0, got {}",
                self.character.speed
            )));
        }
        if !(self.character.acceleration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "character.acceleration must be > 0, got {}",
                self.character.acceleration
            )));
        }
        if let Some(guard) = self.character.rest_guard {
            if !(guard.epsilon > 0.0) || guard.ticks == 0 {
                return Err(ConfigError::Invalid(
                    "character.rest_guard needs epsilon > 0 and ticks > 0".to_string(),
                ));
            }
        }
        if !(self.fade.smoothing_time > 0.0) || !(self.fade.max_speed > 0.0) {
            return Err(ConfigError::Invalid(
                "fade.smoothing_time and fade.max_speed must be > 0".to_string(),
            ));
        }
        if let Some(ppu) = self.pixels_per_unit {
            if !(ppu > 0.0) {
                return Err(ConfigError::Invalid(format!("pixels_per_unit must be > 0, got {}", ppu)));
            }
        }
        Ok(())
    }
}
