//! Geometry factory
//!
//! Maps a geometry tag plus its parameter record to a [`GeometryDescriptor`].
//! The set of kinds is closed: adding a shape means adding a
//! [`GeometryKind`] variant, a descriptor variant and a decode arm here.
//! Callers such as the scene builder never match on kinds themselves.

use serde_json::{Map, Value};

use crate::render::mesh::Mesh;
use crate::scene::SceneError;
use super::{GeometryParamError, TorusKnotParams};

/// Geometry kinds understood by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// `torusKnot`
    TorusKnot,
}

impl GeometryKind {
    /// Every supported kind
    pub const ALL: [Self; 1] = [Self::TorusKnot];

    /// Resolve a document tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Tag as written in documents
    pub fn tag(self) -> &'static str {
        match self {
            Self::TorusKnot => "torusKnot",
        }
    }

    /// Names of the parameters this kind takes
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Self::TorusKnot => &TorusKnotParams::PARAM_NAMES,
        }
    }
}

/// Concrete, validated mesh geometry description
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryDescriptor {
    /// Torus knot
    TorusKnot(TorusKnotParams),
}

impl GeometryDescriptor {
    /// Kind of this geometry
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::TorusKnot(_) => GeometryKind::TorusKnot,
        }
    }

    /// Names of the parameters that can be edited live
    pub fn param_names(&self) -> &'static [&'static str] {
        self.kind().param_names()
    }

    /// Read one parameter
    pub fn param(&self, name: &str) -> Option<f32> {
        match self {
            Self::TorusKnot(params) => params.get(name),
        }
    }

    /// Copy with one parameter changed
    pub fn with_param(&self, name: &str, value: f32) -> Result<Self, GeometryParamError> {
        match self {
            Self::TorusKnot(params) => params.with(name, value).map(Self::TorusKnot),
        }
    }

    /// Generate triangles for this geometry
    pub fn tessellate(&self) -> Mesh {
        match self {
            Self::TorusKnot(params) => params.tessellate(),
        }
    }
}

/// Stateless factory: identical inputs always give equal descriptors
pub struct GeometryFactory;

impl GeometryFactory {
    /// Build a geometry descriptor from a tag and its parameter record
    ///
    /// Unknown tags fail with [`SceneError::UnsupportedGeometryType`] rather
    /// than falling back to a default shape. Malformed parameters fail with
    /// [`SceneError::InvalidDocument`].
    pub fn build(tag: &str, params: &Map<String, Value>) -> Result<GeometryDescriptor, SceneError> {
        let kind = GeometryKind::from_tag(tag).ok_or_else(|| SceneError::UnsupportedGeometryType {
            tag: tag.to_string(),
            object: None,
        })?;

        match kind {
            GeometryKind::TorusKnot => {
                let params: TorusKnotParams = decode(params)?;
                params
                    .validate()
                    .map_err(|e| SceneError::invalid(e.to_string()))?;
                Ok(GeometryDescriptor::TorusKnot(params))
            }
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(params: &Map<String, Value>) -> Result<T, SceneError> {
    serde_json::from_value(Value::Object(params.clone()))
        .map_err(|e| SceneError::invalid(format!("bad geometry parameters: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_build_torus_knot() {
        let params = record(json!({
            "radius": 10, "tube": 3, "tubularSegments": 100,
            "radialSegments": 16, "p": 2, "q": 3
        }));
        let geometry = GeometryFactory::build("torusKnot", &params).unwrap();

        assert_eq!(
            geometry,
            GeometryDescriptor::TorusKnot(TorusKnotParams {
                radius: 10.0,
                tube: 3.0,
                tubular_segments: 100,
                radial_segments: 16,
                p: 2,
                q: 3,
            })
        );
        assert_eq!(geometry.kind(), GeometryKind::TorusKnot);
    }

    #[test]
    fn test_build_is_pure() {
        let params = record(json!({ "radius": 2.5 }));
        let first = GeometryFactory::build("torusKnot", &params).unwrap();
        let second = GeometryFactory::build("torusKnot", &params).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.param("tube"), Some(0.4));
    }

    #[test]
    fn test_unknown_tag_fails_loudly() {
        let result = GeometryFactory::build("teapot", &Map::new());
        assert!(matches!(
            result,
            Err(SceneError::UnsupportedGeometryType { ref tag, object: None }) if tag == "teapot"
        ));
    }

    #[test]
    fn test_bad_parameters() {
        for params in [
            json!({ "radius": -1 }),
            json!({ "tube": 0 }),
            json!({ "p": 1.5 }),
            json!({ "q": 0 }),
            json!({ "radius": "big" }),
            json!({ "tubularSegments": 70000, "radialSegments": 70000 }),
        ] {
            let result = GeometryFactory::build("torusKnot", &record(params.clone()));
            assert!(
                matches!(result, Err(SceneError::InvalidDocument { .. })),
                "expected InvalidDocument for {params}"
            );
        }
    }

    #[test]
    fn test_integral_floats_are_integers() {
        let params = record(json!({ "p": 2.0, "q": 5.0, "radialSegments": 12.0 }));
        let geometry = GeometryFactory::build("torusKnot", &params).unwrap();
        assert_eq!(geometry.param("q"), Some(5.0));
        assert_eq!(geometry.param("radialSegments"), Some(12.0));
    }

    #[test]
    fn test_with_param_keeps_kind() {
        let geometry = GeometryFactory::build("torusKnot", &Map::new()).unwrap();
        let edited = geometry.with_param("q", 5.0).unwrap();
        assert_eq!(edited.param("q"), Some(5.0));
        assert_eq!(edited.kind(), geometry.kind());
    }
}
