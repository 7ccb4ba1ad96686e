//! # Scene Engine
//!
//! Declarative scene configuration for a 3D renderer: a JSON scene document
//! becomes a live set of meshes, materials and lights on a renderer surface,
//! and control panel edits keep that set in sync without rebuilding it.
//!
//! ## Features
//!
//! - **Scene documents**: JSON with per-field defaults and strict validation
//! - **Factories**: geometry and material kinds resolved from document tags
//! - **Lifecycle**: atomic reload, coalesced load requests, deferred edits
//! - **Live edits**: lights, background, materials, geometry and visibility
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut controller = SceneController::new(
//!         RecordingSurface::new(),
//!         FileSource::new("resources/sceneConfig.json"),
//!         LifecycleConfig::default(),
//!     );
//!     controller.on_load_requested()?;
//!     controller.on_parameter_changed(ParameterChange::new("ambient", "intensity", 0.6));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod scene;
pub mod ui;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{
            geometry::{GeometryDescriptor, GeometryFactory, GeometryKind, TorusKnotParams},
            materials::MaterialFactory,
        },
        config::{Config, ConfigError, LifecycleConfig},
        foundation::{
            color::Color,
            math::{Placement, Vec3},
        },
        render::{
            Light, LightKind, MaterialDescriptor, Mesh, RecordingSurface, RenderSurface, SurfaceParams,
        },
        scene::{
            ActiveSceneState, ConfigSource, EditOutcome, EditTarget, EditValue, EditWarning, FileSource,
            LoadOutcome, LoadRequest, LoadState, MemorySource, NodeKey, ParameterChange, SceneBuilder,
            SceneController, SceneDocument, SceneError, SceneNode,
        },
        ui::{ControlPanelBinder, PanelEvent, WidgetInput},
    };
}
