//! Geometry descriptors and the factory that builds them from documents

mod geometry_factory;
mod torus_knot;

pub use geometry_factory::{GeometryFactory, GeometryDescriptor, GeometryKind};
pub use torus_knot::TorusKnotParams;

/// Problems with a single geometry parameter
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryParamError {
    /// The geometry kind has no parameter with this name
    #[error("unknown geometry parameter '{0}'")]
    Unknown(String),

    /// The value is not positive, not finite, or not an integer where one is required
    #[error("geometry parameter '{name}' out of range: {value}")]
    OutOfRange {
        /// Parameter name
        name: String,
        /// Rejected value
        value: f32,
    },
}
