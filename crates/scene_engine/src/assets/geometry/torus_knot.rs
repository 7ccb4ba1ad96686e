//! Torus knot parameters and tessellation

use serde::{de, Deserialize, Deserializer, Serialize};
use std::f32::consts::TAU;

use crate::foundation::math::Vec3;
use crate::render::mesh::{Mesh, Vertex};
use super::GeometryParamError;

/// Parameters of a `(p, q)` torus knot
///
/// Omitted fields take the usual torus knot defaults. All values must be
/// positive; segment counts and the winding numbers are integers, written
/// either as `2` or `2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorusKnotParams {
    /// Radius of the knot's centerline
    pub radius: f32,
    /// Radius of the tube around the centerline
    pub tube: f32,
    /// Segments along the centerline
    #[serde(deserialize_with = "integral")]
    pub tubular_segments: u32,
    /// Segments around the tube
    #[serde(deserialize_with = "integral")]
    pub radial_segments: u32,
    /// Times the knot winds around its axis of rotational symmetry
    #[serde(deserialize_with = "integral")]
    pub p: u32,
    /// Times the knot winds around the interior circle of the torus
    #[serde(deserialize_with = "integral")]
    pub q: u32,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.4,
            tubular_segments: 64,
            radial_segments: 8,
            p: 2,
            q: 3,
        }
    }
}

impl TorusKnotParams {
    /// Largest mesh `tessellate` will be asked for, in vertices
    pub const MAX_VERTICES: usize = 1 << 24;

    /// Editable parameter names, in panel order
    pub const PARAM_NAMES: [&'static str; 6] =
        ["radius", "tube", "tubularSegments", "radialSegments", "p", "q"];

    /// Check that every parameter is positive and finite, and that the
    /// segment counts stay within [`Self::MAX_VERTICES`]
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self) -> Result<(), GeometryParamError> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GeometryParamError::OutOfRange {
                    name: name.to_string(),
                    value,
                })
            }
        };
        positive("radius", self.radius)?;
        positive("tube", self.tube)?;

        for (name, value) in [
            ("tubularSegments", self.tubular_segments),
            ("radialSegments", self.radial_segments),
            ("p", self.p),
            ("q", self.q),
        ] {
            if value == 0 {
                return Err(GeometryParamError::OutOfRange {
                    name: name.to_string(),
                    value: 0.0,
                });
            }
        }

        let vertices = (self.tubular_segments as usize)
            .saturating_add(1)
            .checked_mul((self.radial_segments as usize).saturating_add(1));
        if vertices.map_or(true, |count| count > Self::MAX_VERTICES) {
            let (name, value) = if self.tubular_segments >= self.radial_segments {
                ("tubularSegments", self.tubular_segments)
            } else {
                ("radialSegments", self.radial_segments)
            };
            return Err(GeometryParamError::OutOfRange {
                name: name.to_string(),
                value: value as f32,
            });
        }
        Ok(())
    }

    /// Read a parameter by its document name
    #[allow(clippy::cast_precision_loss)]
    pub fn get(&self, name: &str) -> Option<f32> {
        match name {
            "radius" => Some(self.radius),
            "tube" => Some(self.tube),
            "tubularSegments" => Some(self.tubular_segments as f32),
            "radialSegments" => Some(self.radial_segments as f32),
            "p" => Some(self.p as f32),
            "q" => Some(self.q as f32),
            _ => None,
        }
    }

    /// Copy with one parameter replaced, validated
    pub fn with(&self, name: &str, value: f32) -> Result<Self, GeometryParamError> {
        let integer = || {
            whole(f64::from(value)).ok_or_else(|| GeometryParamError::OutOfRange {
                name: name.to_string(),
                value,
            })
        };

        let mut next = *self;
        match name {
            "radius" => next.radius = value,
            "tube" => next.tube = value,
            "tubularSegments" => next.tubular_segments = integer()?,
            "radialSegments" => next.radial_segments = integer()?,
            "p" => next.p = integer()?,
            "q" => next.q = integer()?,
            _ => return Err(GeometryParamError::Unknown(name.to_string())),
        }
        next.validate()?;
        Ok(next)
    }

    /// Point on the knot's centerline at curve parameter `u`
    fn curve_point(&self, u: f32) -> Vec3 {
        #[allow(clippy::cast_precision_loss)]
        let qu_over_p = self.q as f32 / self.p as f32 * u;
        let cs = qu_over_p.cos();

        Vec3::new(
            self.radius * (2.0 + cs) * 0.5 * u.cos(),
            self.radius * (2.0 + cs) * 0.5 * u.sin(),
            self.radius * qu_over_p.sin() * 0.5,
        )
    }

    /// Build the triangle mesh
    ///
    /// Produces `(tubular + 1) * (radial + 1)` vertices (seams are duplicated
    /// so texture coordinates wrap cleanly) and `tubular * radial * 6` indices.
    /// Expects parameters that passed [`Self::validate`].
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn tessellate(&self) -> Mesh {
        let tubular = self.tubular_segments as usize;
        let radial = self.radial_segments as usize;
        let mut vertices = Vec::with_capacity(tubular.saturating_add(1).saturating_mul(radial.saturating_add(1)).min(Self::MAX_VERTICES));
        let mut indices = Vec::with_capacity(tubular.saturating_mul(radial).saturating_mul(6).min(Self::MAX_VERTICES * 6));

        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * self.p as f32 * TAU;

            // Frenet-like frame from two close points on the curve
            let p1 = self.curve_point(u);
            let p2 = self.curve_point(u + 0.01);
            let tangent = p2 - p1;
            let mut normal = p2 + p1;
            let binormal = tangent.cross(&normal);
            normal = binormal.cross(&tangent);
            let binormal = binormal.normalize();
            let normal = normal.normalize();

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let cx = -self.tube * v.cos();
                let cy = self.tube * v.sin();

                let position = p1 + normal * cx + binormal * cy;
                let surface_normal = (position - p1).normalize();

                vertices.push(Vertex::new(
                    [position.x, position.y, position.z],
                    [surface_normal.x, surface_normal.y, surface_normal.z],
                    [i as f32 / tubular as f32, j as f32 / radial as f32],
                ));
            }
        }

        for j in 1..=tubular {
            for i in 1..=radial {
                // Below MAX_VERTICES, so every index fits in u32
                let a = ((radial + 1) * (j - 1) + (i - 1)) as u32;
                let b = ((radial + 1) * j + (i - 1)) as u32;
                let c = ((radial + 1) * j + i) as u32;
                let d = ((radial + 1) * (j - 1) + i) as u32;

                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Mesh::new(vertices, indices)
    }
}

/// Whole number in `u32` range, if `value` is one
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then(|| value as u32)
}

fn integral<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    whole(value).ok_or_else(|| de::Error::invalid_value(de::Unexpected::Float(value), &"a whole number"))
}
