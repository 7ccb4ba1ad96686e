//! Scene viewer
//!
//! Headless host for the scene engine. Usage:
//!
//! ```text
//! scene_viewer [viewer.toml | viewer.ron]
//! ```
//!
//! Without an argument, `scene_viewer/resources/viewer.toml` is used when it
//! exists and built-in defaults otherwise.

mod app;
mod config;

use std::path::Path;

use scene_engine::config::Config;
use scene_engine::foundation::logging;

use app::ViewerApp;
use config::ViewerConfig;

const DEFAULT_CONFIG: &str = "scene_viewer/resources/viewer.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => ViewerConfig::load_from_file(&path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => ViewerConfig::load_from_file(DEFAULT_CONFIG)?,
        None => ViewerConfig::default(),
    };

    logging::init_with_level(&config.log_level);
    log::info!("Starting scene viewer with {}", config.scene_path);

    let mut app = ViewerApp::new(config);
    if let Err(e) = app.run() {
        log::error!("Scene viewer failed: {}", e);
        return Err(e.into());
    }

    log::info!("Scene viewer finished");
    Ok(())
}
