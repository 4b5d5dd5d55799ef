//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SkinpackError, SkinpackResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where built packs are written when no output path is given.
    pub output_dir: PathBuf,

    /// Defaults applied to a fresh (or reset) pack.
    #[serde(default)]
    pub pack: PackDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for a new editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackDefaults {
    /// Pack display name.
    pub name: String,

    /// Pack description.
    pub description: String,

    /// Prefix of the positional placeholder name given to new skins
    /// (`"{prefix} {n}"`).
    pub skin_name_prefix: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "skinpack_export=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pack: PackDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PackDefaults {
    fn default() -> Self {
        Self {
            name: "My Skin Pack".to_string(),
            description: "Custom Minecraft skin pack".to_string(),
            skin_name_prefix: "Skin".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from `config_path`, falling back to defaults when the file
    /// is missing, unreadable or invalid.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
                    Ok(config) => match config.validate() {
                        Ok(()) => return config,
                        Err(e) => tracing::warn!("Ignoring config at {:?}: {}", config_path, e),
                    },
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Standard config file location (`$XDG_CONFIG_HOME/skinpack/config.json`).
    pub fn path() -> PathBuf {
        config_file_path()
    }

    /// Reject settings that would produce unusable packs.
    pub fn validate(&self) -> SkinpackResult<()> {
        if self.pack.name.trim().is_empty() {
            return Err(SkinpackError::config("pack.name must not be blank"));
        }
        if self.pack.skin_name_prefix.trim().is_empty() {
            return Err(SkinpackError::config("pack.skin_name_prefix must not be blank"));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> SkinpackResult<PathBuf> {
        let config_path = Self::path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Validate and write config as pretty JSON, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> SkinpackResult<()> {
        self.validate()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SkinpackError::config(format!("failed to serialize config: {e}")))?;
        std::fs::write(config_path, json)?;
        tracing::debug!(path = %config_path.display(), "Saved config");
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("skinpack").join("config.json")
}

/// Default directory for built packs.
fn default_output_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("skinpack").join("packs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_pack_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"output_dir": "/tmp/packs"}"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/packs"));
        assert_eq!(config.pack, PackDefaults::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_pack_defaults_partial_override() {
        let defaults: PackDefaults = serde_json::from_str(r#"{"name": "Capes"}"#).unwrap();
        assert_eq!(defaults.name, "Capes");
        assert_eq!(defaults.skin_name_prefix, "Skin");
    }

    #[test]
    fn test_validate_rejects_blank_pack_settings() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.pack.skin_name_prefix = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(SkinpackError::Config { .. })
        ));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skinpack-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = scratch_dir("config-round-trip");
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.pack.name = "Capes".to_string();
        config.logging.json = true;
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_refuses_invalid_config() {
        let dir = scratch_dir("config-invalid");
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.pack.name = String::new();
        assert!(matches!(
            config.save_to(&path),
            Err(SkinpackError::Config { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let dir = scratch_dir("config-garbage");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
