//! Configuration system
//!
//! Host-side settings (logging, where the scene document lives, controller
//! tuning) are plain serde structs loaded from TOML or RON files. Scene
//! documents themselves are not configuration and go through
//! [`crate::scene::SceneDocument`] instead.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, picking the format from the file extension of `path`
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning for the scene lifecycle controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Upper bound on live edits held back while a load is in flight.
    /// When full, the oldest deferred edit is dropped with a warning.
    pub max_deferred_edits: usize,
}

impl LifecycleConfig {
    /// Create a lifecycle configuration with defaults
    pub fn new() -> Self {
        Self {
            max_deferred_edits: 256,
        }
    }

    /// Set the deferred edit bound
    pub fn with_max_deferred_edits(mut self, max: usize) -> Self {
        self.max_deferred_edits = max;
        self
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for LifecycleConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_and_ron() {
        let toml = LifecycleConfig::from_str_with_format("max_deferred_edits = 8", "lifecycle.toml").unwrap();
        assert_eq!(toml.max_deferred_edits, 8);

        let ron = LifecycleConfig::from_str_with_format("(max_deferred_edits: 3)", "lifecycle.ron").unwrap();
        assert_eq!(ron.max_deferred_edits, 3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = LifecycleConfig::from_str_with_format("", "lifecycle.toml").unwrap();
        assert_eq!(config, LifecycleConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = LifecycleConfig::from_str_with_format("{}", "lifecycle.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_save_and_reload_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("scene_engine_lifecycle_{}.toml", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let config = LifecycleConfig::new().with_max_deferred_edits(17);
        config.save_to_file(&path).unwrap();
        let loaded = LifecycleConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
