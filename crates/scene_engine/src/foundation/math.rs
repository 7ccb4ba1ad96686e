//! Math utilities and types
//!
//! Provides the fundamental math types used by scene placement and lighting.

pub use nalgebra::{
    Vector3,
    Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Spatial placement of a scene node: position, Euler rotation and scale
///
/// Rotation is kept as the Euler angles it was authored with (radians) so a
/// placement built from a document reads back exactly. Angles are applied in
/// the fixed order X, Y, Z, i.e. the rotation matrix is `Rx * Ry * Rz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position in 3D space
    pub position: Vec3,

    /// Euler angles in radians (X, Y, Z)
    pub rotation: Vec3,

    /// Scale factors, zero is allowed and collapses the node
    pub scale: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Placement {
    /// Create a new identity placement
    pub fn identity() -> Self {
        Self::default()
    }

    /// Placement of a point: position only, no rotation, unit scale
    pub fn at_point(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Check whether this is the identity placement
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Rotation as a quaternion, composed in X, Y, Z order
    pub fn orientation(&self) -> Quat {
        Quat::from_axis_angle(&Vec3::x_axis(), self.rotation.x)
            * Quat::from_axis_angle(&Vec3::y_axis(), self.rotation.y)
            * Quat::from_axis_angle(&Vec3::z_axis(), self.rotation.z)
    }

    /// Convert to a model matrix (translate * rotate * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.orientation().to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this placement to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Math utility functions
pub mod utils {
    /// Clamp a value into `[0, 1]`, mapping NaN to zero
    pub fn clamp_unit(value: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_placement() {
        let placement = Placement::identity();
        assert!(placement.is_identity());
        assert_relative_eq!(placement.to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let placement = Placement {
            rotation: Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
            ..Default::default()
        };

        // Rx * Ry applied to +Z: Ry sends +Z to +X, Rx leaves +X alone
        let rotated = placement.orientation() * Vec3::z();
        assert_relative_eq!(rotated, Vec3::x(), epsilon = EPSILON);
    }

    #[test]
    fn test_zero_scale_collapses_points() {
        let placement = Placement {
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::zeros(),
            ..Default::default()
        };

        let moved = placement.transform_point(Point3::new(5.0, -4.0, 9.0));
        assert_relative_eq!(moved.coords, Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(utils::clamp_unit(-0.5), 0.0);
        assert_eq!(utils::clamp_unit(1.7), 1.0);
        assert_eq!(utils::clamp_unit(0.25), 0.25);
        assert_eq!(utils::clamp_unit(f32::NAN), 0.0);
    }
}
