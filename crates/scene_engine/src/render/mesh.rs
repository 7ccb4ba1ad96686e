//! Mesh representation for tessellated geometry
//!
//! Geometry descriptors stay small and comparable; a renderer that needs
//! triangles asks the descriptor to tessellate into a [`Mesh`].

use bytemuck::{Pod, Zeroable};

/// Vertex with position, normal and texture coordinates
///
/// `#[repr(C)]` with only `f32` arrays keeps the layout free of padding, so
/// vertex slices can be handed to a GPU upload as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Triangle mesh: vertices plus `u32` indices, three per triangle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex data as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Check that every index points at an existing vertex
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertices.len();
        self.indices.iter().all(|&index| (index as usize) < count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);

        let mesh = Mesh::new(
            vec![Vertex::new([0.0; 3], [0.0, 0.0, 1.0], [0.0; 2]); 3],
            vec![0, 1, 2],
        );
        assert_eq!(mesh.vertex_bytes().len(), 96);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.indices_in_bounds());
    }
}
