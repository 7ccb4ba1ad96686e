//! The single currently-attached scene

use slotmap::SlotMap;

use crate::foundation::color::Color;
use crate::render::lighting::{AmbientLight, DirectionalLight, Light, LightKind};
use super::document::SceneDocument;
use super::node::{NodeKey, SceneNode};
use super::scene_builder::BuiltScene;

/// Row of the panel's layer list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    /// Object id
    pub object_id: String,
    /// Display name
    pub name: String,
    /// Whether the node is attached
    pub visible: bool,
}

/// What the render loop draws this frame
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// Clear color
    pub background: Color,
    /// Active lights, ambient first
    pub lights: Vec<Light>,
    /// Visible nodes in document order
    pub nodes: Vec<(NodeKey, &'a SceneNode)>,
}

/// Scene state owned by the lifecycle controller
///
/// Empty until the first successful load, then replaced wholesale on every
/// successful reload and mutated in place by live edits. Node storage
/// outlives individual scenes so keys of detached nodes are never reissued.
#[derive(Debug)]
pub struct ActiveSceneState {
    document: Option<SceneDocument>,
    background: Color,
    ambient: Option<AmbientLight>,
    directional: Option<DirectionalLight>,
    nodes: SlotMap<NodeKey, SceneNode>,
    order: Vec<NodeKey>,
}

impl Default for ActiveSceneState {
    fn default() -> Self {
        Self {
            document: None,
            background: Color::BLACK,
            ambient: None,
            directional: None,
            nodes: SlotMap::with_key(),
            order: Vec::new(),
        }
    }
}

impl ActiveSceneState {
    /// Create the empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// True until a scene has been loaded
    pub fn is_empty(&self) -> bool {
        self.document.is_none()
    }

    /// Document the current scene was built from
    pub fn document(&self) -> Option<&SceneDocument> {
        self.document.as_ref()
    }

    /// Scene id, empty when nothing is loaded
    pub fn scene_id(&self) -> &str {
        self.document.as_ref().map_or("", |doc| doc.scene_id.as_str())
    }

    /// Current background color
    pub fn background(&self) -> Color {
        self.background
    }

    /// Ambient light, if a scene is loaded
    pub fn ambient(&self) -> Option<&AmbientLight> {
        self.ambient.as_ref()
    }

    /// Directional light, if a scene is loaded
    pub fn directional(&self) -> Option<&DirectionalLight> {
        self.directional.as_ref()
    }

    /// Light in a slot
    pub fn light(&self, kind: LightKind) -> Option<Light> {
        match kind {
            LightKind::Ambient => self.ambient.map(Light::Ambient),
            LightKind::Directional => self.directional.map(Light::Directional),
        }
    }

    /// Number of nodes, visible or not
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// All nodes in document order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> + '_ {
        self.order.iter().filter_map(|&key| self.nodes.get(key).map(|node| (key, node)))
    }

    /// Nodes that are attached to the surface
    pub fn visible_nodes(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> + '_ {
        self.nodes().filter(|(_, node)| node.visible)
    }

    /// Node by key
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Key of the node built from an object id
    pub fn key_of(&self, object_id: &str) -> Option<NodeKey> {
        self.nodes().find(|(_, node)| node.object_id == object_id).map(|(key, _)| key)
    }

    /// Rows for the panel's layer list
    pub fn layers(&self) -> Vec<LayerEntry> {
        self.nodes()
            .map(|(_, node)| LayerEntry {
                object_id: node.object_id.clone(),
                name: node.name.clone(),
                visible: node.visible,
            })
            .collect()
    }

    /// Read-only view for the render loop; an empty scene is just a background
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            background: self.background,
            lights: [LightKind::Ambient, LightKind::Directional]
                .into_iter()
                .filter_map(|kind| self.light(kind))
                .collect(),
            nodes: self.visible_nodes().collect(),
        }
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    pub(crate) fn ambient_mut(&mut self) -> Option<&mut AmbientLight> {
        self.ambient.as_mut()
    }

    pub(crate) fn directional_mut(&mut self) -> Option<&mut DirectionalLight> {
        self.directional.as_mut()
    }

    pub(crate) fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Remove every node and light, returning what was attached
    ///
    /// Returned nodes are in document order and paired with their visibility
    /// so the caller detaches exactly what the surface holds.
    pub(crate) fn clear(&mut self) -> (Vec<(NodeKey, bool)>, Vec<LightKind>) {
        let detached_nodes = self
            .order
            .drain(..)
            .filter_map(|key| self.nodes.remove(key).map(|node| (key, node.visible)))
            .collect();

        let mut detached_lights = Vec::with_capacity(2);
        if self.ambient.take().is_some() {
            detached_lights.push(LightKind::Ambient);
        }
        if self.directional.take().is_some() {
            detached_lights.push(LightKind::Directional);
        }

        self.document = None;
        (detached_nodes, detached_lights)
    }

    /// Install a freshly built scene into a cleared state, returning the new keys
    pub(crate) fn install(&mut self, document: SceneDocument, built: BuiltScene) -> Vec<NodeKey> {
        debug_assert!(self.order.is_empty(), "install on a state that was not cleared");

        self.background = built.background;
        self.ambient = Some(built.ambient);
        self.directional = Some(built.directional);
        self.order = built.nodes.into_iter().map(|node| self.nodes.insert(node)).collect();
        self.document = Some(document);
        self.order.clone()
    }
}
