//! Scene builder
//!
//! Turns a whole [`SceneDocument`] into a [`BuiltScene`]: background, the two
//! lights and one [`SceneNode`] per object entry, in document order. Building
//! is fail-fast: the first bad entry aborts the build and the error names that
//! entry. Nothing here touches a renderer surface.

use crate::assets::geometry::GeometryFactory;
use crate::assets::materials::MaterialFactory;
use crate::foundation::color::Color;
use crate::render::lighting::{AmbientLight, DirectionalLight, Light};
use super::document::{ObjectConfig, SceneDocument};
use super::error::SceneError;
use super::node::SceneNode;
use super::transform::TransformApplier;

/// Output of the builder, not yet attached anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltScene {
    /// Scene id of the source document
    pub scene_id: String,
    /// Background clear color
    pub background: Color,
    /// Ambient light
    pub ambient: AmbientLight,
    /// Directional light
    pub directional: DirectionalLight,
    /// Nodes in document order
    pub nodes: Vec<SceneNode>,
}

impl BuiltScene {
    /// Both lights, ambient first
    pub fn lights(&self) -> [Light; 2] {
        [Light::Ambient(self.ambient), Light::Directional(self.directional)]
    }
}

/// Builds scenes from documents using the geometry and material factories
#[derive(Debug, Default, Clone, Copy)]
pub struct SceneBuilder;

impl SceneBuilder {
    /// Create a scene builder
    pub fn new() -> Self {
        Self
    }

    /// Build every part of the document
    pub fn build(&self, document: &SceneDocument) -> Result<BuiltScene, SceneError> {
        let lighting = &document.lighting;

        let ambient = AmbientLight {
            color: lighting.ambient.color,
            intensity: lighting.ambient.intensity,
        };
        let directional = DirectionalLight {
            color: lighting.directional.color,
            intensity: lighting.directional.intensity,
            placement: TransformApplier::point(lighting.directional.position),
        };

        let nodes = document
            .objects
            .iter()
            .map(|object| self.build_node(object))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Built scene '{}' with {} node(s)",
            document.scene_id,
            nodes.len()
        );

        Ok(BuiltScene {
            scene_id: document.scene_id.clone(),
            background: document.background,
            ambient,
            directional,
            nodes,
        })
    }

    /// Build the node for a single object entry
    pub fn build_node(&self, object: &ObjectConfig) -> Result<SceneNode, SceneError> {
        let geometry = GeometryFactory::build(&object.kind, &object.geometry)
            .map_err(|e| e.in_object(&object.id))?;
        let material = MaterialFactory::from_config(&object.material)
            .map_err(|e| e.in_object(&object.id))?;
        let placement = TransformApplier::placement(&object.transform);

        Ok(SceneNode {
            object_id: object.id.clone(),
            name: object.display_name().to_string(),
            visible: object.visible,
            geometry,
            material,
            placement,
        })
    }
}
