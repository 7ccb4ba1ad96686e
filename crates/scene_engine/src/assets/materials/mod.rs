//! Material creation from document material sections

mod material_factory;

pub use material_factory::{MaterialFactory, SurfaceInputs};
