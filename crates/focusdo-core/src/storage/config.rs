//! TOML-based application configuration.
//!
//! Stores the timer duration table and engine policy knobs, plus the break
//! game multiplier. The 1-second work phase some builds ship for manual
//! testing is expressed here as `timer.work_secs`, never as a code change.
//!
//! Configuration is stored at `~/.config/focusdo/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{EngineConfig, PhaseDurations};

/// Timer durations and policies, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: u64,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u64,
    /// Take a long break every Nth completed work phase; absent means never.
    #[serde(default)]
    pub long_break_every: Option<u32>,
    /// Keep the countdown running into the next phase after a completion.
    #[serde(default)]
    pub resume_on_completion: bool,
}

/// Break minigame configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusdo/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub game: GameConfig,
}

fn default_work_secs() -> u64 {
    25 * 60
}
fn default_short_break_secs() -> u64 {
    5 * 60
}
fn default_long_break_secs() -> u64 {
    15 * 60
}
fn default_multiplier() -> f64 {
    1.0
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            long_break_every: None,
            resume_on_completion: false,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            multiplier: default_multiplier(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default file on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The engine policy derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            durations: PhaseDurations {
                work_secs: self.timer.work_secs,
                short_break_secs: self.timer.short_break_secs,
                long_break_secs: self.timer.long_break_secs,
            },
            long_break_every: self.timer.long_break_every,
            resume_on_completion: self.timer.resume_on_completion,
            game_multiplier: self.game.multiplier,
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// into the field's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        self.save()
    }

    /// Cross-field checks that type-level parsing cannot catch.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.game.multiplier <= 0.0 || !self.game.multiplier.is_finite() {
            return Err(ConfigError::ParseFailed(format!(
                "game.multiplier must be a positive number, got {}",
                self.game.multiplier
            )));
        }
        Ok(())
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    // Null leaves are optional numeric fields (long_break_every).
                    serde_json::Value::Number(_) | serde_json::Value::Null => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    ConfigError::ParseFailed(format!(
                                        "cannot parse '{value}' as number"
                                    ))
                                })?
                        } else if value == "none" {
                            serde_json::Value::Null
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.work_secs, 1500);
        assert_eq!(parsed.timer.short_break_secs, 300);
        assert_eq!(parsed.timer.long_break_secs, 900);
        assert_eq!(parsed.game.multiplier, 1.0);
    }

    #[test]
    fn engine_config_mirrors_timer_section() {
        let mut cfg = Config::default();
        cfg.timer.work_secs = 1;
        cfg.timer.long_break_every = Some(4);
        let ec = cfg.engine_config();
        assert_eq!(ec.durations.work_secs, 1);
        assert_eq!(ec.long_break_every, Some(4));
        assert!(!ec.resume_on_completion);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.work_secs").as_deref(), Some("1500"));
        assert_eq!(
            cfg.get("timer.resume_on_completion").as_deref(),
            Some("false")
        );
        assert!(cfg.get("timer.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "timer.work_secs", "60").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "timer.work_secs").unwrap(),
            &serde_json::Value::Number(60.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_optional_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "timer.long_break_every", "4").unwrap();
        let parsed: Config = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.timer.long_break_every, Some(4));
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "timer.nonexistent", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_non_positive_multiplier() {
        // The error surfaces before the config is mutated or saved.
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("game.multiplier", "0"),
            Err(ConfigError::ParseFailed(_))
        ));
        assert!(matches!(
            cfg.set("game.multiplier", "-1.5"),
            Err(ConfigError::ParseFailed(_))
        ));
        assert_eq!(cfg.game.multiplier, 1.0);
    }

    #[test]
    fn set_json_value_by_path_rejects_bad_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result =
            Config::set_json_value_by_path(&mut json, "timer.resume_on_completion", "maybe");
        assert!(matches!(result, Err(ConfigError::ParseFailed(_))));
    }
}
