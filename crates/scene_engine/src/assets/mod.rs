//! Asset factories
//!
//! Turn the untyped parts of a scene document (geometry records, material
//! sections) into the typed descriptors the renderer consumes.

pub mod geometry;
pub mod materials;
