//! Lighting system
//!
//! A scene carries exactly one ambient and one directional light. Both are
//! addressed on the renderer surface by their [`LightKind`].

use crate::foundation::color::Color;
use crate::foundation::math::{Placement, Vec3};

/// Light slots of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LightKind {
    /// Uniform light from every direction
    Ambient,
    /// Parallel light, like sunlight
    Directional,
}

/// Ambient light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
}

/// Directional light
///
/// Positioned like a point (no rotation or scale); it shines from its
/// position towards the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
    /// Placement of the light's source point
    pub placement: Placement,
}

impl DirectionalLight {
    /// Light position
    pub fn position(&self) -> Vec3 {
        self.placement.position
    }

    /// Normalized direction the light travels in, `None` when it sits at the origin
    pub fn direction(&self) -> Option<Vec3> {
        (-self.placement.position).try_normalize(f32::EPSILON)
    }
}

/// Either light, as handed to a renderer surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Ambient light
    Ambient(AmbientLight),
    /// Directional light
    Directional(DirectionalLight),
}

impl Light {
    /// Slot this light occupies
    pub fn kind(&self) -> LightKind {
        match self {
            Self::Ambient(_) => LightKind::Ambient,
            Self::Directional(_) => LightKind::Directional,
        }
    }

    /// Light color
    pub fn color(&self) -> Color {
        match self {
            Self::Ambient(light) => light.color,
            Self::Directional(light) => light.color,
        }
    }

    /// Light intensity
    pub fn intensity(&self) -> f32 {
        match self {
            Self::Ambient(light) => light.intensity,
            Self::Directional(light) => light.intensity,
        }
    }
}
