//! Headless viewer application
//!
//! Runs the scene lifecycle against a recording surface: the first load is
//! fetched on a worker thread while scripted panel input keeps arriving, then
//! the rest of the script is played and the resulting scene is reported.

use std::sync::mpsc;
use std::thread;

use scene_engine::config::ConfigError;
use scene_engine::prelude::*;
use scene_engine::render::surface::SurfaceOp;
use scene_engine::scene::{LoadSummary, PanelResponse};
use scene_engine::ui::PanelState;

use crate::config::ViewerConfig;

/// Errors that stop the viewer
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// Viewer configuration could not be read
    #[error("viewer configuration: {0}")]
    Config(#[from] ConfigError),

    /// The initial scene could not be loaded
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// A load was already running when the viewer started one
    #[error("a scene load is already in flight")]
    LoadInFlight,

    /// The fetch worker went away without answering
    #[error("scene fetch worker exited without a result")]
    FetchWorker,
}

/// Viewer state: controller, panel binder and the script to play
pub struct ViewerApp {
    controller: SceneController<RecordingSurface, FileSource>,
    binder: ControlPanelBinder,
    config: ViewerConfig,
}

impl ViewerApp {
    /// Create the viewer with nothing loaded
    pub fn new(config: ViewerConfig) -> Self {
        let source = FileSource::new(&config.scene_path);
        let controller = SceneController::new(RecordingSurface::new(), source, config.lifecycle.clone());

        Self {
            controller,
            binder: ControlPanelBinder::new(),
            config,
        }
    }

    /// Load the scene, play the script and log the result
    pub fn run(&mut self) -> Result<(), ViewerError> {
        let summary = self.initial_load()?;
        self.binder.sync_with(self.controller.active());

        if summary.reload_pending {
            log::info!("Reload requested during the first load; loading again");
            self.load_now();
        }

        for input in self.config.script.after_load.clone() {
            self.send(&input);
        }

        self.report();
        Ok(())
    }

    /// Fetch on a worker thread, feeding `during_load` input meanwhile
    fn initial_load(&mut self) -> Result<LoadSummary, ViewerError> {
        let LoadRequest::Started(ticket) = self.controller.begin_load() else {
            return Err(ViewerError::LoadInFlight);
        };

        let (sender, receiver) = mpsc::channel();
        let mut source = self.controller.source().clone();
        let worker = thread::spawn(move || {
            if sender.send(source.fetch()).is_err() {
                log::debug!("Scene fetch finished after the viewer stopped waiting");
            }
        });

        for input in self.config.script.during_load.clone() {
            self.send(&input);
        }

        let fetched = receiver.recv().map_err(|_| ViewerError::FetchWorker)?;
        if worker.join().is_err() {
            log::warn!("Scene fetch worker panicked after answering");
        }

        Ok(self.controller.complete_load(ticket, fetched)?)
    }

    fn load_now(&mut self) {
        match self.controller.on_load_requested() {
            Ok(LoadOutcome::Loaded(_)) => self.binder.sync_with(self.controller.active()),
            Ok(LoadOutcome::Coalesced) => log::debug!("Load request coalesced"),
            Err(e) => log::warn!("Reload failed, keeping the current scene: {}", e),
        }
    }

    fn send(&mut self, input: &WidgetInput) {
        let Some(event) = self.binder.translate(input) else {
            return;
        };
        match self.controller.handle(event) {
            PanelResponse::Load(Ok(LoadOutcome::Loaded(_))) => self.binder.sync_with(self.controller.active()),
            PanelResponse::Load(Ok(LoadOutcome::Coalesced)) => log::debug!("Load request coalesced"),
            PanelResponse::Load(Err(e)) => log::warn!("Reload failed, keeping the current scene: {}", e),
            PanelResponse::Edit(outcome) => log::debug!("{} -> {:?}", input.widget, outcome),
        }
    }

    fn report(&self) {
        let active = self.controller.active();
        let surface = self.controller.surface();
        let frame = active.frame();

        log::info!(
            "Scene '{}': {} node(s), {} drawn, background {}",
            active.scene_id(),
            active.len(),
            frame.nodes.len(),
            frame.background
        );
        for layer in active.layers() {
            log::info!(
                "  layer {:<12} {:<12} {}",
                layer.object_id,
                layer.name,
                if layer.visible { "visible" } else { "hidden" }
            );
        }
        for (key, node) in &frame.nodes {
            let mesh = node.geometry.tessellate();
            log::info!(
                "  node {:?} '{}': {} vertices, {} triangles, at {:?}",
                key,
                node.object_id,
                mesh.vertices.len(),
                mesh.triangle_count(),
                node.placement.position.as_slice()
            );
        }

        log_panel(&self.binder.panel_state(active));

        let updates = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, SurfaceOp::UpdateNode(_) | SurfaceOp::UpdateLight(_)))
            .count();
        log::info!(
            "Surface received {} call(s), {} in-place update(s), {} anomal(ies)",
            surface.ops().len(),
            updates,
            surface.anomalies()
        );
    }
}

fn log_panel(panel: &PanelState) {
    log::info!(
        "Panel: ambient {:.2}, directional {:.2}, background {}",
        panel.ambient_intensity,
        panel.directional_intensity,
        panel.background
    );
    if let Some(selected) = &panel.selected {
        log::info!(
            "Panel: '{}' color {} metalness {:.2} roughness {:.2} {:?}",
            selected.object_id,
            selected.color,
            selected.metalness,
            selected.roughness,
            selected.geometry
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelScript;

    const SCENE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/sceneConfig.json");

    fn config(script: PanelScript) -> ViewerConfig {
        ViewerConfig {
            scene_path: SCENE.to_string(),
            script,
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn test_run_replays_input_sent_during_load() {
        let mut app = ViewerApp::new(config(PanelScript {
            during_load: vec![WidgetInput::new("ambientLight", "0.45")],
            after_load: vec![
                WidgetInput::new("layerSelect", "knot-small"),
                WidgetInput::new("objVisible", "true"),
            ],
        }));

        app.run().unwrap();

        let active = app.controller.active();
        assert_eq!(active.scene_id(), "viewer-demo");
        assert_eq!(active.ambient().map(|light| light.intensity), Some(0.45));
        assert_eq!(app.controller.surface().attached_keys().len(), 2);
        assert_eq!(app.controller.surface().anomalies(), 0);
    }

    #[test]
    fn test_missing_scene_fails_run() {
        let mut app = ViewerApp::new(ViewerConfig {
            scene_path: "does/not/exist.json".to_string(),
            ..ViewerConfig::default()
        });

        assert!(matches!(app.run(), Err(ViewerError::Scene(SceneError::FetchFailure { .. }))));
        assert_eq!(app.controller.state(), LoadState::Empty);
    }
}
