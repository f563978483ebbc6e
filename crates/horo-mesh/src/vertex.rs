use bytemuck::{Pod, Zeroable};

/// Interleaved GPU vertex: model position, normal, texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 4],
    pub normal: [f32; 4],
    pub tex_coord: [f32; 2],
}

/// Finished vertex and index buffers, ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub(crate) fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(indices.len() % 3, 0);
        Self { vertices, indices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }

    #[inline]
    pub fn indices(&self) -> &[u32] { &self.indices }

    #[inline]
    pub fn num_triangles(&self) -> usize { self.indices.len() / 3 }

    pub fn is_empty(&self) -> bool { self.indices.is_empty() }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Raw vertex bytes for a GPU vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] { bytemuck::cast_slice(&self.vertices) }

    /// Raw index bytes for a GPU index buffer.
    pub fn index_bytes(&self) -> &[u8] { bytemuck::cast_slice(&self.indices) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        let mesh = Mesh::new(vec![Vertex::default(); 3], vec![0, 1, 2]);
        assert_eq!(mesh.vertex_bytes().len(), 120);
        assert_eq!(mesh.index_bytes().len(), 12);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }
}
