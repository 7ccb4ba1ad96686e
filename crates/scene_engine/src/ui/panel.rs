//! Control panel binder
//!
//! Widget ids are fixed strings shared with the panel markup. Object-scoped
//! widgets (`objColor`, the geometry inputs, ...) act on the selected object,
//! picked from the layer list or defaulted to the first object after a load.

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::scene::{ActiveSceneState, EditTarget, EditValue, LayerEntry, ParameterChange};

/// Widget ids understood by the binder
pub mod widgets {
    /// Load button
    pub const LOAD_SCENE: &str = "btnLoadScene";
    /// Ambient intensity slider
    pub const AMBIENT_LIGHT: &str = "ambientLight";
    /// Directional intensity slider
    pub const DIRECTIONAL_LIGHT: &str = "directionalLight";
    /// Background color picker
    pub const BACKGROUND_COLOR: &str = "bgColor";
    /// Selected object's color picker
    pub const OBJECT_COLOR: &str = "objColor";
    /// Selected object's metalness slider
    pub const OBJECT_METALNESS: &str = "objMetal";
    /// Selected object's roughness slider
    pub const OBJECT_ROUGHNESS: &str = "objRough";
    /// Selected object's visibility checkbox
    pub const OBJECT_VISIBLE: &str = "objVisible";
    /// Layer list; the value is the object id to select
    pub const LAYER_SELECT: &str = "layerSelect";
}

/// Raw input from one panel widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInput {
    /// Widget id
    pub widget: String,
    /// Widget value as text
    pub value: String,
}

impl WidgetInput {
    /// Create an input
    pub fn new(widget: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            widget: widget.into(),
            value: value.into(),
        }
    }
}

/// Events the panel raises on the lifecycle controller
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// The load button was pressed
    LoadRequested,
    /// A parameter widget changed
    ParameterChanged(ParameterChange),
}

/// Panel values for the selected object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPanel {
    /// Object id
    pub object_id: String,
    /// Material color
    pub color: Color,
    /// Material metalness
    pub metalness: f32,
    /// Material roughness
    pub roughness: f32,
    /// Visibility checkbox
    pub visible: bool,
    /// Geometry inputs as `(widget id, value)`
    pub geometry: Vec<(&'static str, f32)>,
}

/// Everything the panel shows after a load or edit
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    /// Ambient intensity slider
    pub ambient_intensity: f32,
    /// Directional intensity slider
    pub directional_intensity: f32,
    /// Background color picker
    pub background: Color,
    /// Layer list
    pub layers: Vec<LayerEntry>,
    /// Selected object, if any
    pub selected: Option<ObjectPanel>,
}

/// Translates widget input into [`PanelEvent`]s
#[derive(Debug, Default, Clone)]
pub struct ControlPanelBinder {
    selected: Option<String>,
}

impl ControlPanelBinder {
    /// Create a binder with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the object that object-scoped widgets edit
    pub fn selected_object(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select an object by id
    pub fn select(&mut self, object_id: impl Into<String>) {
        self.selected = Some(object_id.into());
    }

    /// Re-point the selection after a load
    ///
    /// Keeps the current selection if the new scene still has it, otherwise
    /// selects the first object (or nothing for an empty scene).
    pub fn sync_with(&mut self, scene: &ActiveSceneState) {
        let still_there = self
            .selected
            .as_deref()
            .is_some_and(|id| scene.key_of(id).is_some());
        if !still_there {
            self.selected = scene.nodes().next().map(|(_, node)| node.object_id.clone());
        }
    }

    /// Translate one widget input
    ///
    /// # Arguments
    /// * `input` - Widget id and its value as text
    ///
    /// # Returns
    /// The event to hand to the controller, or `None` when the widget is
    /// unknown, the value does not parse, or an object-scoped widget fires
    /// with nothing selected. Selection changes are handled here and also
    /// return `None`.
    pub fn translate(&mut self, input: &WidgetInput) -> Option<PanelEvent> {
        let value = input.value.trim();
        let change = match input.widget.as_str() {
            widgets::LOAD_SCENE => return Some(PanelEvent::LoadRequested),
            widgets::LAYER_SELECT => {
                log::debug!("Panel selected object '{}'", value);
                self.select(value);
                return None;
            }
            widgets::AMBIENT_LIGHT => {
                ParameterChange::new(EditTarget::Ambient, "intensity", parse_number(input)?)
            }
            widgets::DIRECTIONAL_LIGHT => {
                ParameterChange::new(EditTarget::Directional, "intensity", parse_number(input)?)
            }
            widgets::BACKGROUND_COLOR => {
                ParameterChange::new(EditTarget::Background, "color", parse_color(input)?)
            }
            widgets::OBJECT_COLOR => self.object_change(input, "color", parse_color(input)?)?,
            widgets::OBJECT_METALNESS => self.object_change(input, "metalness", parse_number(input)?)?,
            widgets::OBJECT_ROUGHNESS => self.object_change(input, "roughness", parse_number(input)?)?,
            widgets::OBJECT_VISIBLE => {
                let flag = EditValue::from(value).as_bool().or_else(|| dropped(input, "not a boolean"))?;
                self.object_change(input, "visible", EditValue::Bool(flag))?
            }
            widget if is_geometry_widget(widget) => {
                let number = parse_number(input)?;
                self.object_change(input, widget, number)?
            }
            _ => return dropped(input, "unknown widget"),
        };
        Some(PanelEvent::ParameterChanged(change))
    }

    /// Values the panel should display for `scene`
    pub fn panel_state(&self, scene: &ActiveSceneState) -> PanelState {
        let selected = self
            .selected
            .as_deref()
            .and_then(|id| scene.key_of(id))
            .and_then(|key| scene.node(key))
            .map(|node| {
                let surface = node.material.surface();
                ObjectPanel {
                    object_id: node.object_id.clone(),
                    color: surface.color(),
                    metalness: surface.metalness(),
                    roughness: surface.roughness(),
                    visible: node.visible,
                    geometry: node
                        .geometry
                        .param_names()
                        .iter()
                        .filter_map(|&name| node.geometry.param(name).map(|value| (name, value)))
                        .collect(),
                }
            });

        PanelState {
            ambient_intensity: scene.ambient().map_or(0.0, |light| light.intensity),
            directional_intensity: scene.directional().map_or(0.0, |light| light.intensity),
            background: scene.background(),
            layers: scene.layers(),
            selected,
        }
    }

    fn object_change(
        &self,
        input: &WidgetInput,
        field: &str,
        value: impl Into<EditValue>,
    ) -> Option<ParameterChange> {
        match &self.selected {
            Some(id) => Some(ParameterChange::new(EditTarget::Object(id.clone()), field, value)),
            None => dropped(input, "no object selected"),
        }
    }
}

fn is_geometry_widget(widget: &str) -> bool {
    crate::assets::geometry::GeometryKind::ALL
        .into_iter()
        .any(|kind| kind.param_names().iter().any(|name| *name == widget))
}

fn parse_number(input: &WidgetInput) -> Option<f32> {
    input
        .value
        .trim()
        .parse::<f32>()
        .ok()
        .or_else(|| dropped(input, "not a number"))
}

fn parse_color(input: &WidgetInput) -> Option<Color> {
    Color::from_hex(input.value.trim())
        .ok()
        .or_else(|| dropped(input, "not a hex color"))
}

fn dropped<T>(input: &WidgetInput, reason: &str) -> Option<T> {
    log::debug!("Dropping panel input {}={:?}: {}", input.widget, input.value, reason);
    None
}
