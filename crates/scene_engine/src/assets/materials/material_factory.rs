//! Unified material creation API
//!
//! MaterialFactory maps a material tag plus color/metalness/roughness to a
//! [`MaterialDescriptor`]. Out-of-range metalness and roughness are clamped
//! into `[0, 1]`, the valid domain of a physically based shading model,
//! instead of being rejected.

use crate::foundation::color::Color;
use crate::render::material::{MaterialDescriptor, MaterialKind, StandardMaterialParams};
use crate::scene::MaterialConfig;
use crate::scene::SceneError;

/// Capability inputs every material family is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInputs {
    /// Base color
    pub color: Color,
    /// Requested metalness, clamped by the factory
    pub metalness: f32,
    /// Requested roughness, clamped by the factory
    pub roughness: f32,
}

impl From<&MaterialConfig> for SurfaceInputs {
    fn from(config: &MaterialConfig) -> Self {
        Self {
            color: config.color,
            metalness: config.metalness,
            roughness: config.roughness,
        }
    }
}

/// Unified factory for material creation
pub struct MaterialFactory;

impl MaterialFactory {
    /// Build a material descriptor
    ///
    /// # Errors
    /// [`SceneError::UnsupportedMaterialType`] for tags outside the known families.
    pub fn build(tag: &str, inputs: &SurfaceInputs) -> Result<MaterialDescriptor, SceneError> {
        let kind = MaterialKind::from_tag(tag).ok_or_else(|| SceneError::UnsupportedMaterialType {
            tag: tag.to_string(),
            object: None,
        })?;

        Ok(match kind {
            MaterialKind::Standard => MaterialDescriptor::Standard(StandardMaterialParams::new(
                inputs.color,
                inputs.metalness,
                inputs.roughness,
            )),
        })
    }

    /// Build from a document material section
    pub fn from_config(config: &MaterialConfig) -> Result<MaterialDescriptor, SceneError> {
        Self::build(&config.kind, &SurfaceInputs::from(config))
    }

    /// List all available material tags
    pub fn list_kinds() -> Vec<&'static str> {
        MaterialKind::ALL.iter().map(|kind| kind.tag()).collect()
    }
}
