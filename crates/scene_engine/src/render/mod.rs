//! Rendering-side types
//!
//! The engine does not draw anything itself. It hands nodes, lights and the
//! background to a [`RenderSurface`] owned by the host, which also owns the
//! camera and viewport.

pub mod lighting;
pub mod material;
pub mod mesh;
pub mod surface;

pub use lighting::{AmbientLight, DirectionalLight, Light, LightKind};
pub use material::{MaterialDescriptor, MaterialKind, StandardMaterialParams, SurfaceParams};
pub use mesh::{Mesh, Vertex};
pub use surface::{RecordingSurface, RenderSurface, SurfaceOp, SurfaceSnapshot};
