//! Runtime scene nodes

use crate::assets::geometry::GeometryDescriptor;
use crate::foundation::math::Placement;
use crate::render::material::MaterialDescriptor;

slotmap::new_key_type! {
    /// Identity of a node on the renderer surface
    ///
    /// Keys are generational: once a node is removed its key never compares
    /// equal to a key handed out later, even when the slot is reused.
    pub struct NodeKey;
}

/// A renderable object built from one document entry
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Id of the originating object entry, used to route live edits
    pub object_id: String,
    /// Display name
    pub name: String,
    /// Whether the node is attached to the surface
    pub visible: bool,
    /// Mesh geometry
    pub geometry: GeometryDescriptor,
    /// Surface material
    pub material: MaterialDescriptor,
    /// Spatial placement
    pub placement: Placement,
}
