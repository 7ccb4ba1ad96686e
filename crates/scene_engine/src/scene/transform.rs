//! Transform applier: document transforms to node placements

use crate::foundation::math::Placement;
use super::document::{TransformConfig, VectorConfig};

/// Maps position/rotation/scale triples onto a [`Placement`]
///
/// No validation beyond the numbers being numbers: a zero scale is legal and
/// simply collapses the node.
pub struct TransformApplier;

impl TransformApplier {
    /// Overwrite `placement` with the document transform
    pub fn apply(placement: &mut Placement, transform: &TransformConfig) {
        placement.position = transform.position.to_vec3();
        placement.rotation = transform.rotation.to_vec3();
        placement.scale = transform.scale.to_vec3();
    }

    /// Fresh placement from a document transform
    pub fn placement(transform: &TransformConfig) -> Placement {
        let mut placement = Placement::identity();
        Self::apply(&mut placement, transform);
        placement
    }

    /// Placement of a point (position only), used for lights
    pub fn point(position: VectorConfig) -> Placement {
        Placement::at_point(position.to_vec3())
    }
}
