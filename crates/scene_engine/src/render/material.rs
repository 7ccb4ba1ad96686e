//! Surface material descriptors
//!
//! Every material family exposes the same [`SurfaceParams`] capability set
//! (color, metalness, roughness), so live edits never need to know which
//! family a node uses.

use crate::foundation::color::Color;
use crate::foundation::math::utils::clamp_unit;

/// Color/metalness/roughness capability shared by all material families
///
/// Setters clamp metalness and roughness into `[0, 1]`.
pub trait SurfaceParams {
    /// Base color
    fn color(&self) -> Color;
    /// Set the base color
    fn set_color(&mut self, color: Color);
    /// Metalness in `[0, 1]`
    fn metalness(&self) -> f32;
    /// Set metalness, clamped
    fn set_metalness(&mut self, value: f32);
    /// Roughness in `[0, 1]`
    fn roughness(&self) -> f32;
    /// Set roughness, clamped
    fn set_roughness(&mut self, value: f32);
}

/// Standard metallic/roughness PBR parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterialParams {
    /// Base color (albedo)
    pub base_color: Color,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metallic: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
}

impl StandardMaterialParams {
    /// Create parameters, clamping metallic and roughness into `[0, 1]`
    pub fn new(base_color: Color, metallic: f32, roughness: f32) -> Self {
        Self {
            base_color,
            metallic: clamp_unit(metallic),
            roughness: clamp_unit(roughness),
        }
    }
}

impl Default for StandardMaterialParams {
    fn default() -> Self {
        Self::new(Color::WHITE, 0.0, 1.0)
    }
}

impl SurfaceParams for StandardMaterialParams {
    fn color(&self) -> Color {
        self.base_color
    }

    fn set_color(&mut self, color: Color) {
        self.base_color = color;
    }

    fn metalness(&self) -> f32 {
        self.metallic
    }

    fn set_metalness(&mut self, value: f32) {
        self.metallic = clamp_unit(value);
    }

    fn roughness(&self) -> f32 {
        self.roughness
    }

    fn set_roughness(&mut self, value: f32) {
        self.roughness = clamp_unit(value);
    }
}

/// Material families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// `standard`: metallic/roughness PBR
    Standard,
}

impl MaterialKind {
    /// Every supported family
    pub const ALL: [Self; 1] = [Self::Standard];

    /// Resolve a document tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Tag as written in documents
    pub fn tag(self) -> &'static str {
        match self {
            Self::Standard => "standard",
        }
    }
}

/// Concrete surface shading description
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialDescriptor {
    /// Standard PBR material
    Standard(StandardMaterialParams),
}

impl MaterialDescriptor {
    /// Family of this material
    pub fn kind(&self) -> MaterialKind {
        match self {
            Self::Standard(_) => MaterialKind::Standard,
        }
    }

    /// Shared color/metalness/roughness view
    pub fn surface(&self) -> &dyn SurfaceParams {
        match self {
            Self::Standard(params) => params,
        }
    }

    /// Mutable shared view, used by live edits
    pub fn surface_mut(&mut self) -> &mut dyn SurfaceParams {
        match self {
            Self::Standard(params) => params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clamp() {
        let mut material = MaterialDescriptor::Standard(StandardMaterialParams::default());
        let surface = material.surface_mut();

        surface.set_metalness(3.0);
        surface.set_roughness(-2.0);
        assert_eq!(surface.metalness(), 1.0);
        assert_eq!(surface.roughness(), 0.0);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(MaterialKind::from_tag("standard"), Some(MaterialKind::Standard));
        assert_eq!(MaterialKind::from_tag("phong"), None);
    }
}
