//! Renderer surface abstraction
//!
//! A surface is whatever actually draws: it receives nodes and lights as they
//! are attached, updated and detached, plus the background color. The camera
//! and viewport belong to the surface and are never touched by the engine.

use std::collections::BTreeMap;

use crate::foundation::color::Color;
use crate::scene::{NodeKey, SceneNode};
use super::lighting::{Light, LightKind};

/// Rendering surface trait
///
/// Calls arrive between frames. During a reload the engine detaches the whole
/// previous scene before attaching anything new, all within one call into the
/// controller, so a surface that renders between controller calls never sees
/// old and new nodes together.
pub trait RenderSurface {
    /// Start drawing a node
    fn attach_node(&mut self, key: NodeKey, node: &SceneNode);

    /// Stop drawing a node
    fn detach_node(&mut self, key: NodeKey);

    /// Node changed in place (material, geometry parameters)
    fn update_node(&mut self, key: NodeKey, node: &SceneNode);

    /// Start using a light
    fn attach_light(&mut self, light: &Light);

    /// Stop using the light in this slot
    fn detach_light(&mut self, kind: LightKind);

    /// Light changed in place
    fn update_light(&mut self, light: &Light);

    /// Change the clear color
    fn set_background(&mut self, color: Color);
}

/// One call made against a [`RecordingSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    /// `attach_node`
    AttachNode(NodeKey),
    /// `detach_node`
    DetachNode(NodeKey),
    /// `update_node`
    UpdateNode(NodeKey),
    /// `attach_light`
    AttachLight(LightKind),
    /// `detach_light`
    DetachLight(LightKind),
    /// `update_light`
    UpdateLight(LightKind),
    /// `set_background`
    SetBackground(Color),
}

/// Everything a surface currently draws
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceSnapshot {
    /// Attached nodes in attach order
    pub nodes: Vec<(NodeKey, SceneNode)>,
    /// Attached lights
    pub lights: BTreeMap<LightKind, Light>,
    /// Current clear color, `None` before the first scene
    pub background: Option<Color>,
}

impl SurfaceSnapshot {
    /// Keys of the attached nodes, in attach order
    pub fn keys(&self) -> Vec<NodeKey> {
        self.nodes.iter().map(|(key, _)| *key).collect()
    }
}

/// In-memory surface that keeps the attached set and logs every call
///
/// Used by headless hosts and tests. Calls that would corrupt a real render
/// graph (attaching a key twice, detaching or updating a key that is not
/// attached) are counted as anomalies and logged.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    attached: SurfaceSnapshot,
    ops: Vec<SurfaceOp>,
    anomalies: usize,
}

impl RecordingSurface {
    /// Create an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the currently attached set
    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.attached.clone()
    }

    /// Keys of the attached nodes, in attach order
    pub fn attached_keys(&self) -> Vec<NodeKey> {
        self.attached.keys()
    }

    /// Attached node by key
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.attached
            .nodes
            .iter()
            .find(|(attached, _)| *attached == key)
            .map(|(_, node)| node)
    }

    /// Attached light in a slot
    pub fn light(&self, kind: LightKind) -> Option<&Light> {
        self.attached.lights.get(&kind)
    }

    /// Current clear color
    pub fn background(&self) -> Option<Color> {
        self.attached.background
    }

    /// Every call received so far
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forget the call log, keeping the attached set
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of inconsistent calls received
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    fn position(&self, key: NodeKey) -> Option<usize> {
        self.attached.nodes.iter().position(|(attached, _)| *attached == key)
    }

    fn anomaly(&mut self, what: &str, key: NodeKey) {
        self.anomalies += 1;
        log::warn!("Surface anomaly: {} {:?}", what, key);
    }
}

impl RenderSurface for RecordingSurface {
    fn attach_node(&mut self, key: NodeKey, node: &SceneNode) {
        self.ops.push(SurfaceOp::AttachNode(key));
        if self.position(key).is_some() {
            self.anomaly("node attached twice", key);
            return;
        }
        self.attached.nodes.push((key, node.clone()));
    }

    fn detach_node(&mut self, key: NodeKey) {
        self.ops.push(SurfaceOp::DetachNode(key));
        match self.position(key) {
            Some(index) => {
                self.attached.nodes.remove(index);
            }
            None => self.anomaly("detach of unattached node", key),
        }
    }

    fn update_node(&mut self, key: NodeKey, node: &SceneNode) {
        self.ops.push(SurfaceOp::UpdateNode(key));
        match self.position(key) {
            Some(index) => self.attached.nodes[index].1 = node.clone(),
            None => self.anomaly("update of unattached node", key),
        }
    }

    fn attach_light(&mut self, light: &Light) {
        self.ops.push(SurfaceOp::AttachLight(light.kind()));
        if self.attached.lights.insert(light.kind(), *light).is_some() {
            self.anomalies += 1;
            log::warn!("Surface anomaly: {:?} light attached twice", light.kind());
        }
    }

    fn detach_light(&mut self, kind: LightKind) {
        self.ops.push(SurfaceOp::DetachLight(kind));
        if self.attached.lights.remove(&kind).is_none() {
            self.anomalies += 1;
            log::warn!("Surface anomaly: detach of unattached {:?} light", kind);
        }
    }

    fn update_light(&mut self, light: &Light) {
        self.ops.push(SurfaceOp::UpdateLight(light.kind()));
        match self.attached.lights.get_mut(&light.kind()) {
            Some(slot) => *slot = *light,
            None => {
                self.anomalies += 1;
                log::warn!("Surface anomaly: update of unattached {:?} light", light.kind());
            }
        }
    }

    fn set_background(&mut self, color: Color) {
        self.ops.push(SurfaceOp::SetBackground(color));
        self.attached.background = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::lighting::AmbientLight;
    use crate::scene::{SceneBuilder, SceneDocument};
    use slotmap::SlotMap;

    fn sample_node() -> SceneNode {
        SceneBuilder::new()
            .build(&SceneDocument::sample())
            .unwrap()
            .nodes
            .remove(0)
    }

    #[test]
    fn test_attach_detach_tracks_set() {
        let mut keys: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let first = keys.insert(());
        let second = keys.insert(());
        let node = sample_node();

        let mut surface = RecordingSurface::new();
        surface.attach_node(first, &node);
        surface.attach_node(second, &node);
        surface.detach_node(first);

        assert_eq!(surface.attached_keys(), vec![second]);
        assert_eq!(surface.anomalies(), 0);
        assert_eq!(
            surface.ops(),
            &[
                SurfaceOp::AttachNode(first),
                SurfaceOp::AttachNode(second),
                SurfaceOp::DetachNode(first),
            ]
        );
    }

    #[test]
    fn test_inconsistent_calls_are_counted() {
        let mut keys: SlotMap<NodeKey, ()> = SlotMap::with_key();
        let key = keys.insert(());
        let node = sample_node();

        let mut surface = RecordingSurface::new();
        surface.attach_node(key, &node);
        surface.attach_node(key, &node);
        surface.detach_node(key);
        surface.detach_node(key);
        surface.update_light(&Light::Ambient(AmbientLight {
            color: Color::WHITE,
            intensity: 1.0,
        }));

        assert_eq!(surface.anomalies(), 3);
        assert!(surface.attached_keys().is_empty());
    }
}
