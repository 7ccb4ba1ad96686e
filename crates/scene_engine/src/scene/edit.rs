//! Live parameter edits
//!
//! A [`ParameterChange`] names a target (a light, the background, or an
//! object id), a field and a new value. Applying one mutates the active scene
//! in place; nodes keep their keys and are never rebuilt from the document.

use std::fmt;

use crate::foundation::color::Color;
use crate::render::lighting::LightKind;
use super::active::ActiveSceneState;
use super::error::EditWarning;
use super::node::NodeKey;

/// What an edit addresses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditTarget {
    /// The ambient light
    Ambient,
    /// The directional light
    Directional,
    /// The background color
    Background,
    /// The node built from an object entry with this id
    Object(String),
}

impl EditTarget {
    /// Reserved name of the ambient light
    pub const AMBIENT: &'static str = "ambient";
    /// Reserved name of the directional light
    pub const DIRECTIONAL: &'static str = "directional";
    /// Reserved name of the background
    pub const BACKGROUND: &'static str = "background";

    /// Resolve a target name; anything not reserved is an object id
    pub fn parse(name: &str) -> Self {
        match name {
            Self::AMBIENT => Self::Ambient,
            Self::DIRECTIONAL => Self::Directional,
            Self::BACKGROUND => Self::Background,
            id => Self::Object(id.to_string()),
        }
    }

    /// Target name as written in edits
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ambient => Self::AMBIENT,
            Self::Directional => Self::DIRECTIONAL,
            Self::Background => Self::BACKGROUND,
            Self::Object(id) => id,
        }
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EditTarget {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

/// New value carried by an edit
///
/// Panels often hand over raw text; [`EditValue::Text`] is converted on use.
#[derive(Debug, Clone, PartialEq)]
pub enum EditValue {
    /// Numeric slider or spinner value
    Number(f32),
    /// Checkbox value
    Bool(bool),
    /// Color picker value
    Color(Color),
    /// Unparsed text
    Text(String),
}

impl EditValue {
    /// Value as a number
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Bool(_) | Self::Color(_) => None,
        }
    }

    /// Value as a color
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            Self::Text(text) => Color::from_hex(text.trim()).ok(),
            Self::Number(_) | Self::Bool(_) => None,
        }
    }

    /// Value as a flag
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            Self::Text(text) => match text.trim() {
                "true" | "on" | "1" => Some(true),
                "false" | "off" | "0" => Some(false),
                _ => None,
            },
            Self::Number(_) | Self::Color(_) => None,
        }
    }
}

impl From<f32> for EditValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for EditValue {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: f64) -> Self {
        Self::Number(value as f32)
    }
}

impl From<bool> for EditValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Color> for EditValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<&str> for EditValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single live edit
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterChange {
    /// What is edited
    pub target: EditTarget,
    /// Field on the target, e.g. `intensity`, `roughness` or `radius`
    pub field: String,
    /// New value
    pub value: EditValue,
}

impl ParameterChange {
    /// Create an edit
    pub fn new(target: impl Into<EditTarget>, field: impl Into<String>, value: impl Into<EditValue>) -> Self {
        Self {
            target: target.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ParameterChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.field)
    }
}

/// Result of submitting an edit to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The scene changed and the surface was told
    Applied,
    /// Valid edit that matched the current value
    Unchanged,
    /// A load is in flight; the edit is queued and replayed afterwards
    Deferred,
    /// Nothing changed
    Ignored(EditWarning),
}

/// What the surface must hear about after an edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum EditEffect {
    Light(LightKind),
    Background,
    NodeUpdated(NodeKey),
    NodeShown(NodeKey),
    NodeHidden(NodeKey),
    Unchanged,
}

/// Apply an edit to the active scene
pub(crate) fn apply(state: &mut ActiveSceneState, change: &ParameterChange) -> Result<EditEffect, EditWarning> {
    if state.is_empty() {
        return Err(EditWarning::NoActiveScene);
    }

    match &change.target {
        EditTarget::Ambient => {
            let light = state.ambient_mut().ok_or(EditWarning::NoActiveScene)?;
            match change.field.as_str() {
                "intensity" => light.intensity = intensity(change)?,
                "color" => light.color = color(change)?,
                _ => return Err(unsupported(change)),
            }
            Ok(EditEffect::Light(LightKind::Ambient))
        }
        EditTarget::Directional => {
            let light = state.directional_mut().ok_or(EditWarning::NoActiveScene)?;
            match change.field.as_str() {
                "intensity" => light.intensity = intensity(change)?,
                "color" => light.color = color(change)?,
                "position.x" => light.placement.position.x = finite(change)?,
                "position.y" => light.placement.position.y = finite(change)?,
                "position.z" => light.placement.position.z = finite(change)?,
                _ => return Err(unsupported(change)),
            }
            Ok(EditEffect::Light(LightKind::Directional))
        }
        EditTarget::Background => match change.field.as_str() {
            "color" => {
                state.set_background(color(change)?);
                Ok(EditEffect::Background)
            }
            _ => Err(unsupported(change)),
        },
        EditTarget::Object(id) => {
            let key = state
                .key_of(id)
                .ok_or_else(|| EditWarning::UnknownEditTarget(id.clone()))?;
            let node = state
                .node_mut(key)
                .ok_or_else(|| EditWarning::UnknownEditTarget(id.clone()))?;

            match change.field.as_str() {
                "color" => node.material.surface_mut().set_color(color(change)?),
                "metalness" => node.material.surface_mut().set_metalness(number(change)?),
                "roughness" => node.material.surface_mut().set_roughness(number(change)?),
                "visible" => {
                    let visible = change
                        .value
                        .as_bool()
                        .ok_or_else(|| invalid(change, "expected a boolean"))?;
                    if node.visible == visible {
                        return Ok(EditEffect::Unchanged);
                    }
                    node.visible = visible;
                    return Ok(if visible {
                        EditEffect::NodeShown(key)
                    } else {
                        EditEffect::NodeHidden(key)
                    });
                }
                field if node.geometry.param(field).is_some() => {
                    let value = number(change)?;
                    node.geometry = node
                        .geometry
                        .with_param(field, value)
                        .map_err(|e| invalid(change, e.to_string()))?;
                }
                _ => return Err(unsupported(change)),
            }
            Ok(EditEffect::NodeUpdated(key))
        }
    }
}

fn unsupported(change: &ParameterChange) -> EditWarning {
    EditWarning::UnsupportedEditField {
        target: change.target.to_string(),
        field: change.field.clone(),
    }
}

fn invalid(change: &ParameterChange, reason: impl Into<String>) -> EditWarning {
    EditWarning::InvalidEditValue {
        target: change.target.to_string(),
        field: change.field.clone(),
        reason: reason.into(),
    }
}

fn number(change: &ParameterChange) -> Result<f32, EditWarning> {
    change.value.as_number().ok_or_else(|| invalid(change, "expected a number"))
}

fn finite(change: &ParameterChange) -> Result<f32, EditWarning> {
    let value = number(change)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(change, format!("{value} is not finite")))
    }
}

fn intensity(change: &ParameterChange) -> Result<f32, EditWarning> {
    let value = finite(change)?;
    if value < 0.0 {
        return Err(invalid(change, format!("intensity {value} is negative")));
    }
    Ok(value)
}

fn color(change: &ParameterChange) -> Result<Color, EditWarning> {
    change.value.as_color().ok_or_else(|| invalid(change, "expected a hex color"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::geometry::GeometryDescriptor;
    use crate::scene::{SceneBuilder, SceneDocument};
    use approx::assert_relative_eq;

    fn loaded() -> ActiveSceneState {
        let document = SceneDocument::sample();
        let built = SceneBuilder::new().build(&document).unwrap();
        let mut state = ActiveSceneState::new();
        state.install(document, built);
        state
    }

    #[test]
    fn test_target_names() {
        assert_eq!(EditTarget::parse("ambient"), EditTarget::Ambient);
        assert_eq!(EditTarget::parse("background"), EditTarget::Background);
        assert_eq!(EditTarget::parse("obj-1"), EditTarget::Object("obj-1".to_string()));
        assert_eq!(EditTarget::Directional.to_string(), "directional");
    }

    #[test]
    fn test_text_values_convert() {
        assert_eq!(EditValue::from(" 0.25 ").as_number(), Some(0.25));
        assert_eq!(EditValue::from("#00ff00").as_color(), Some(Color::from_rgb8(0, 255, 0)));
        assert_eq!(EditValue::from("off").as_bool(), Some(false));
        assert_eq!(EditValue::from("banana").as_number(), None);
        assert_eq!(EditValue::Bool(true).as_color(), None);
    }

    #[test]
    fn test_ambient_intensity_edit() {
        let mut state = loaded();
        let effect = apply(&mut state, &ParameterChange::new("ambient", "intensity", 0.75)).unwrap();

        assert_eq!(effect, EditEffect::Light(LightKind::Ambient));
        assert_eq!(state.ambient().unwrap().intensity, 0.75);
        assert_eq!(state.directional().unwrap().intensity, 0.8);
    }

    #[test]
    fn test_negative_intensity_rejected() {
        let mut state = loaded();
        let warning = apply(&mut state, &ParameterChange::new("directional", "intensity", -1.0)).unwrap_err();

        assert!(matches!(warning, EditWarning::InvalidEditValue { ref field, .. } if field == "intensity"));
        assert_eq!(state.directional().unwrap().intensity, 0.8);
    }

    #[test]
    fn test_directional_position_component() {
        let mut state = loaded();
        apply(&mut state, &ParameterChange::new("directional", "position.y", -5.0)).unwrap();
        assert_relative_eq!(state.directional().unwrap().position().y, -5.0);
    }

    #[test]
    fn test_material_edits_clamp() {
        let mut state = loaded();
        let key = state.key_of("obj-1").unwrap();

        let effect = apply(&mut state, &ParameterChange::new("obj-1", "roughness", 1.5)).unwrap();
        assert_eq!(effect, EditEffect::NodeUpdated(key));
        apply(&mut state, &ParameterChange::new("obj-1", "metalness", -0.5)).unwrap();

        let surface = state.node(key).unwrap().material.surface();
        assert_eq!(surface.roughness(), 1.0);
        assert_eq!(surface.metalness(), 0.0);
    }

    #[test]
    fn test_geometry_edit_keeps_key() {
        let mut state = loaded();
        let key = state.key_of("obj-1").unwrap();

        apply(&mut state, &ParameterChange::new("obj-1", "radialSegments", 24.0)).unwrap();

        assert_eq!(state.key_of("obj-1"), Some(key));
        let GeometryDescriptor::TorusKnot(params) = state.node(key).unwrap().geometry;
        assert_eq!(params.radial_segments, 24);
        assert_eq!(params.radius, 10.0);
    }

    #[test]
    fn test_bad_geometry_value_leaves_node() {
        let mut state = loaded();
        let key = state.key_of("obj-1").unwrap();
        let before = state.node(key).unwrap().clone();

        let warning = apply(&mut state, &ParameterChange::new("obj-1", "p", 0.5)).unwrap_err();

        assert!(matches!(warning, EditWarning::InvalidEditValue { .. }));
        assert_eq!(state.node(key).unwrap(), &before);
    }

    #[test]
    fn test_visibility_toggle() {
        let mut state = loaded();
        let key = state.key_of("obj-1").unwrap();

        assert_eq!(
            apply(&mut state, &ParameterChange::new("obj-1", "visible", false)).unwrap(),
            EditEffect::NodeHidden(key)
        );
        assert_eq!(
            apply(&mut state, &ParameterChange::new("obj-1", "visible", false)).unwrap(),
            EditEffect::Unchanged
        );
        assert_eq!(
            apply(&mut state, &ParameterChange::new("obj-1", "visible", "true")).unwrap(),
            EditEffect::NodeShown(key)
        );
    }

    #[test]
    fn test_unknown_target_and_field() {
        let mut state = loaded();

        assert_eq!(
            apply(&mut state, &ParameterChange::new("obj-9", "color", "#fff")).unwrap_err(),
            EditWarning::UnknownEditTarget("obj-9".to_string())
        );
        assert_eq!(
            apply(&mut state, &ParameterChange::new("background", "intensity", 1.0)).unwrap_err(),
            EditWarning::UnsupportedEditField {
                target: "background".to_string(),
                field: "intensity".to_string(),
            }
        );
    }

    #[test]
    fn test_edit_on_empty_state() {
        let mut state = ActiveSceneState::new();
        assert_eq!(
            apply(&mut state, &ParameterChange::new("ambient", "intensity", 1.0)).unwrap_err(),
            EditWarning::NoActiveScene
        );
    }
}
