//! Viewer configuration

use scene_engine::config::{Config, LifecycleConfig};
use scene_engine::ui::WidgetInput;
use serde::{Deserialize, Serialize};

/// Settings for one viewer run, read from TOML or RON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Scene configuration document to load
    pub scene_path: String,
    /// Lifecycle controller tuning
    pub lifecycle: LifecycleConfig,
    /// Scripted panel input
    pub script: PanelScript,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            scene_path: "scene_viewer/resources/sceneConfig.json".to_string(),
            lifecycle: LifecycleConfig::default(),
            script: PanelScript::default(),
        }
    }
}

impl Config for ViewerConfig {}

/// Panel input played against the controller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelScript {
    /// Sent while the initial load is in flight
    pub during_load: Vec<WidgetInput>,
    /// Sent once the initial load has settled
    pub after_load: Vec<WidgetInput>,
}
