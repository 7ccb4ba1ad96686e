//! Scene document model
//!
//! The typed mirror of the JSON scene configuration. Parsing fills in the
//! same defaults the browser viewer used for partially written documents
//! (lighting, background, per-object transform and material), while the
//! parts that have no sensible default (object ids, geometry tags and
//! parameters) are required.
//!
//! Geometry parameters stay untyped here: their shape depends on the
//! object's `type` tag and is decoded by the geometry factory.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::foundation::color::Color;
use crate::foundation::math::Vec3;
use super::edit::EditTarget;
use super::error::SceneError;

/// One complete scene, as loaded from a configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    /// Free-form identifier of the scene
    #[serde(default)]
    pub scene_id: String,

    /// Background clear color
    #[serde(default = "default_background")]
    pub background: Color,

    /// The scene's ambient and directional light
    #[serde(default)]
    pub lighting: LightingConfig,

    /// Objects in document order
    pub objects: Vec<ObjectConfig>,
}

/// Lighting section: exactly one ambient and one directional light
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Ambient light
    #[serde(default)]
    pub ambient: AmbientConfig,

    /// Directional light
    #[serde(default)]
    pub directional: DirectionalConfig,
}

/// Ambient light parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientConfig {
    /// Light color
    #[serde(default)]
    pub color: Color,
    /// Light intensity
    #[serde(default = "default_ambient_intensity")]
    pub intensity: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: default_ambient_intensity(),
        }
    }
}

/// Directional light parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalConfig {
    /// Light color
    #[serde(default)]
    pub color: Color,
    /// Light intensity
    #[serde(default = "default_directional_intensity")]
    pub intensity: f32,
    /// Light position; the light shines from here towards the origin
    #[serde(default = "default_directional_position", deserialize_with = "directional_position")]
    pub position: VectorConfig,
}

impl Default for DirectionalConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: default_directional_intensity(),
            position: default_directional_position(),
        }
    }
}

/// `{x, y, z}` triple as written in documents
///
/// Missing components take the default of the field the vector belongs to,
/// so `"scale": {"x": 2}` means `(2, 1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VectorConfig {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl VectorConfig {
    /// Create a vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Convert to a math vector
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Vector as it appears on disk, before component defaults are applied
#[derive(Debug, Default, Deserialize)]
struct PartialVector {
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
}

impl PartialVector {
    fn or(self, fallback: VectorConfig) -> VectorConfig {
        VectorConfig {
            x: self.x.unwrap_or(fallback.x),
            y: self.y.unwrap_or(fallback.y),
            z: self.z.unwrap_or(fallback.z),
        }
    }
}

/// Directional light positions fill missing components from `(10, 20, 30)`
fn directional_position<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<VectorConfig, D::Error> {
    Ok(PartialVector::deserialize(deserializer)?.or(default_directional_position()))
}

/// Object transform: position, rotation (radians, X/Y/Z order) and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialTransform")]
pub struct TransformConfig {
    /// Position
    pub position: VectorConfig,
    /// Euler rotation in radians
    pub rotation: VectorConfig,
    /// Scale
    pub scale: VectorConfig,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            position: VectorConfig::splat(0.0),
            rotation: VectorConfig::splat(0.0),
            scale: VectorConfig::splat(1.0),
        }
    }
}

#[derive(Deserialize)]
struct PartialTransform {
    #[serde(default)]
    position: PartialVector,
    #[serde(default)]
    rotation: PartialVector,
    #[serde(default)]
    scale: PartialVector,
}

impl From<PartialTransform> for TransformConfig {
    fn from(raw: PartialTransform) -> Self {
        let identity = Self::default();
        Self {
            position: raw.position.or(identity.position),
            rotation: raw.rotation.or(identity.rotation),
            scale: raw.scale.or(identity.scale),
        }
    }
}

/// Surface material section of an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    /// Material family tag
    #[serde(rename = "type", default = "default_material_type")]
    pub kind: String,
    /// Base color
    #[serde(default)]
    pub color: Color,
    /// Metalness, clamped into `[0, 1]` by the material factory
    #[serde(default)]
    pub metalness: f32,
    /// Roughness, clamped into `[0, 1]` by the material factory
    #[serde(default = "default_roughness")]
    pub roughness: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            kind: default_material_type(),
            color: Color::WHITE,
            metalness: 0.0,
            roughness: default_roughness(),
        }
    }
}

/// One object entry of a scene document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    /// Unique id within the document; live edits address objects by it
    pub id: String,

    /// Display name, the id is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the object starts attached to the surface
    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Geometry tag, e.g. `torusKnot`
    #[serde(rename = "type")]
    pub kind: String,

    /// Placement of the object
    #[serde(default)]
    pub transform: TransformConfig,

    /// Tag-dependent geometry parameters
    pub geometry: Map<String, Value>,

    /// Surface material
    #[serde(default)]
    pub material: MaterialConfig,

    /// Reserved for animation settings; carried but never driven
    #[serde(default)]
    pub animation: Map<String, Value>,
}

impl ObjectConfig {
    /// Name shown in layer lists
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl SceneDocument {
    /// Parse and validate a JSON scene document
    pub fn from_json_str(text: &str) -> Result<Self, SceneError> {
        let document: Self = serde_json::from_str(text)
            .map_err(|e| SceneError::invalid(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    /// Parse and validate an already decoded JSON value
    pub fn from_json_value(value: Value) -> Result<Self, SceneError> {
        let document: Self = serde_json::from_value(value)
            .map_err(|e| SceneError::invalid(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    /// Serialize back to pretty JSON
    pub fn to_json_string(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::invalid(e.to_string()))
    }

    /// Check document-wide constraints serde cannot express
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut seen = HashSet::with_capacity(self.objects.len());
        for object in &self.objects {
            if object.id.trim().is_empty() {
                return Err(SceneError::invalid("object id must not be empty"));
            }
            if [EditTarget::AMBIENT, EditTarget::DIRECTIONAL, EditTarget::BACKGROUND].contains(&object.id.as_str()) {
                return Err(SceneError::invalid(format!("object id '{}' is reserved", object.id)));
            }
            if !seen.insert(object.id.as_str()) {
                return Err(SceneError::invalid(format!("duplicate object id '{}'", object.id)));
            }
        }
        Ok(())
    }

    /// Look up an object entry by id
    pub fn object(&self, id: &str) -> Option<&ObjectConfig> {
        self.objects.iter().find(|object| object.id == id)
    }

    /// The demo scene the viewer ships with: a single magenta torus knot
    pub fn sample() -> Self {
        let geometry: Map<String, Value> = [
            ("radius", 10),
            ("tube", 3),
            ("tubularSegments", 100),
            ("radialSegments", 16),
            ("p", 2),
            ("q", 3),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::from(value)))
        .collect();

        Self {
            scene_id: "demo-001".to_string(),
            background: Color::from_rgb8(0x11, 0x11, 0x11),
            lighting: LightingConfig {
                ambient: AmbientConfig {
                    color: Color::WHITE,
                    intensity: 0.3,
                },
                directional: DirectionalConfig {
                    color: Color::WHITE,
                    intensity: 0.8,
                    position: VectorConfig::new(10.0, 20.0, 30.0),
                },
            },
            objects: vec![ObjectConfig {
                id: "obj-1".to_string(),
                name: Some("TorusKnot".to_string()),
                visible: true,
                kind: "torusKnot".to_string(),
                transform: TransformConfig::default(),
                geometry,
                material: MaterialConfig {
                    kind: "standard".to_string(),
                    color: Color::from_rgb8(0xff, 0x00, 0xff),
                    metalness: 1.0,
                    roughness: 0.0,
                },
                animation: Map::new(),
            }],
        }
    }
}

fn default_background() -> Color {
    Color::from_rgb8(0xff, 0x00, 0xff)
}

fn default_ambient_intensity() -> f32 {
    0.5
}

fn default_directional_intensity() -> f32 {
    1.0
}

fn default_directional_position() -> VectorConfig {
    VectorConfig::new(10.0, 20.0, 30.0)
}

fn default_material_type() -> String {
    "standard".to_string()
}

fn default_roughness() -> f32 {
    1.0
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::tests::SAMPLE_JSON;
    use serde_json::json;

    #[test]
    fn test_sample_json_matches_builtin_sample() {
        let parsed = SceneDocument::from_json_str(SAMPLE_JSON).unwrap();
        assert_eq!(parsed, SceneDocument::sample());
    }

    #[test]
    fn test_defaults_fill_sparse_document() {
        let document = SceneDocument::from_json_str(
            r#"{ "objects": [ { "id": "a", "type": "torusKnot", "geometry": {},
                 "transform": { "scale": { "x": 2 } } } ] }"#,
        )
        .unwrap();

        assert_eq!(document.scene_id, "");
        assert_eq!(document.background.to_hex(), "#ff00ff");
        assert_eq!(document.lighting.ambient.intensity, 0.5);
        assert_eq!(document.lighting.directional.position, VectorConfig::new(10.0, 20.0, 30.0));

        let object = &document.objects[0];
        assert!(object.visible);
        assert_eq!(object.display_name(), "a");
        assert_eq!(object.transform.scale, VectorConfig::new(2.0, 1.0, 1.0));
        assert_eq!(object.transform.position, VectorConfig::splat(0.0));
        assert_eq!(object.material, MaterialConfig::default());
    }

    #[test]
    fn test_partial_directional_position() {
        let document = SceneDocument::from_json_str(
            r#"{ "lighting": { "directional": { "position": { "y": -5 } } }, "objects": [] }"#,
        )
        .unwrap();
        assert_eq!(document.lighting.directional.position, VectorConfig::new(10.0, -5.0, 30.0));
        assert_eq!(document.lighting.directional.intensity, 1.0);
    }

    #[test]
    fn test_missing_required_fields() {
        for text in [
            r#"{}"#,
            r#"{ "objects": [ { "type": "torusKnot", "geometry": {} } ] }"#,
            r#"{ "objects": [ { "id": "a", "geometry": {} } ] }"#,
            r#"{ "objects": [ { "id": "a", "type": "torusKnot" } ] }"#,
            r#"{ "objects": [ { "id": "a", "type": "torusKnot", "geometry": 7 } ] }"#,
            r#"{ "background": "not-a-color", "objects": [] }"#,
            r#"not json"#,
        ] {
            let result = SceneDocument::from_json_str(text);
            assert!(
                matches!(result, Err(SceneError::InvalidDocument { .. })),
                "expected InvalidDocument for {text}"
            );
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = SceneDocument::from_json_str(
            r#"{ "objects": [
                { "id": "a", "type": "torusKnot", "geometry": {} },
                { "id": "a", "type": "torusKnot", "geometry": {} } ] }"#,
        );
        assert!(matches!(result, Err(SceneError::InvalidDocument { reason, .. }) if reason.contains("duplicate")));
    }

    #[test]
    fn test_edit_target_names_are_not_object_ids() {
        for id in ["ambient", "directional", "background"] {
            let result = SceneDocument::from_json_value(json!({
                "objects": [ { "id": id, "type": "torusKnot", "geometry": {} } ]
            }));
            assert!(
                matches!(&result, Err(SceneError::InvalidDocument { reason, .. }) if reason.contains("reserved")),
                "expected '{id}' to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_json_round_trip_keeps_document() {
        let sample = SceneDocument::sample();
        let text = sample.to_json_string().unwrap();
        assert_eq!(SceneDocument::from_json_str(&text).unwrap(), sample);
    }
}
