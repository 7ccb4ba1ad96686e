//! Lifecycle tests against a recording surface

use serde_json::json;

use crate::config::LifecycleConfig;
use crate::render::surface::RecordingSurface;
use super::{MemorySource, SceneController};

mod live_edits;

/// The sample scene document
pub(crate) const SAMPLE_JSON: &str = include_str!("sample_scene.json");

type TestController = SceneController<RecordingSurface, MemorySource>;

fn controller() -> TestController {
    controller_with(LifecycleConfig::default())
}

fn controller_with(config: LifecycleConfig) -> TestController {
    SceneController::new(
        RecordingSurface::new(),
        MemorySource::new("memory://sceneConfig.json", SAMPLE_JSON),
        config,
    )
}

fn loaded_controller() -> TestController {
    let mut controller = controller();
    controller.on_load_requested().unwrap();
    controller.surface_mut().clear_ops();
    controller
}

/// Three knots, the middle one hidden
fn three_knots() -> String {
    json!({
        "sceneId": "three-knots",
        "background": "#000000",
        "objects": [
            { "id": "a", "type": "torusKnot", "geometry": { "radius": 1 } },
            { "id": "b", "type": "torusKnot", "visible": false, "geometry": { "radius": 2 } },
            { "id": "c", "type": "torusKnot", "geometry": { "radius": 3, "p": 3, "q": 5 } }
        ]
    })
    .to_string()
}
