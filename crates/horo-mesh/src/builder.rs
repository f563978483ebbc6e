use crate::{Mesh, MeshError, Vertex};
use horo::{Geometry, Isometry, Vec2, Vec3, Vec4};
use horo_tess::Tessellation;
use tracing::debug;

/// Accumulates vertices and triangles in one model geometry.
///
/// Positions and normals are given in double precision and stored as the
/// single-precision [`Vertex`] the GPU consumes.
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    geometry: Geometry,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl ModelBuilder {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry, vertices: Vec::new(), indices: Vec::new() }
    }

    #[inline]
    pub fn geometry(&self) -> Geometry { self.geometry }

    #[inline]
    pub fn num_vertices(&self) -> usize { self.vertices.len() }

    #[inline]
    pub fn num_triangles(&self) -> usize { self.indices.len() / 3 }

    pub fn build(self) -> Mesh {
        debug!(
            geometry = ?self.geometry,
            vertices = self.vertices.len(),
            triangles = self.indices.len() / 3,
            "mesh built"
        );
        Mesh::new(self.vertices, self.indices)
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, pos: Vec4<f64>, normal: Vec4<f64>, tex_coord: Vec2<f64>) -> Result<u32, MeshError> {
        let index = u32::try_from(self.vertices.len()).map_err(|_| MeshError::TooManyVertices)?;
        self.vertices.push(Vertex {
            pos: pos.to_f32_array(),
            normal: normal.to_f32_array(),
            tex_coord: tex_coord.to_f32_array(),
        });
        Ok(index)
    }

    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.indices.extend_from_slice(&[v0, v1, v2]);
    }

    /// Flat polygon, triangulated as a fan from its first corner.
    ///
    /// The shared normal is taken through corners `0`, `n/3` and `2n/3`;
    /// texture coordinates go round the unit circle.
    pub fn add_polygon_face(&mut self, positions: &[Vec4<f64>]) -> Result<(), MeshError> {
        let n = positions.len();
        if n < 3 {
            return Err(MeshError::DegeneratePolygon { corners: n });
        }
        let g = self.geometry;
        let normal = g.normalize(g.normal(positions[0], positions[n / 3], positions[2 * n / 3]));

        // Checked up front so a failure leaves no stray vertices.
        let first = index_range(self.vertices.len(), n)?;
        let corners = u32::try_from(n).map_err(|_| MeshError::TooManyVertices)?;

        for (i, &p) in positions.iter().enumerate() {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            self.add_vertex(p, normal, Vec2::on_unit_disc(angle))?;
        }
        for i in 1..corners - 1 {
            self.add_triangle(first, first + i, first + i + 1);
        }
        Ok(())
    }

    /// Tube around the geodesic from `transform · origin` along the local
    /// z axis: a regular `sides`-gon of circumradius `radius`, swept over
    /// arc length `length` in `steps` rings.
    pub fn add_prism(&mut self, transform: &Isometry, sides: usize, radius: f64, length: f64, steps: usize) -> Result<(), MeshError> {
        if sides < 3 || steps == 0 {
            return Err(MeshError::InvalidPrism { sides, steps });
        }
        let g = self.geometry;
        let (sr, cr) = (g.sin_like(radius), g.cos_like(radius));
        let ring = |side: usize| {
            let angle = (side % sides) as f64 * std::f64::consts::TAU / sides as f64;
            Vec4::new(angle.cos() * sr, angle.sin() * sr, 0.0, cr)
        };
        // A point one unit along z from the rim, to tilt the base normal outwards.
        let lift = g.displacement(Vec3::z()) * g.origin::<f64>();

        let mut rows: Vec<Vec<[u32; 2]>> = Vec::with_capacity(sides);
        for side in 0..sides {
            let base = [ring(side), ring(side + 1)];
            let base_normal = g.normalize(g.normal(base[0], base[1], g.translation(base[0]) * lift));

            let mut row = Vec::with_capacity(steps + 1);
            for step in 0..=steps {
                let along = length * step as f64 / steps as f64;
                let step_transform = *transform * g.displacement(Vec3::new(0.0, 0.0, along));
                let normal = step_transform * base_normal;
                let mut pair = [0; 2];
                for (k, slot) in pair.iter_mut().enumerate() {
                    let uv = Vec2::new(step as f64 / steps as f64, (side + k) as f64 / sides as f64);
                    *slot = self.add_vertex(step_transform * base[k], normal, uv)?;
                }
                row.push(pair);
            }
            rows.push(row);
        }

        for row in &rows {
            for step in 0..steps {
                let (here, next) = (row[step], row[step + 1]);
                self.add_triangle(here[0], here[1], next[1]);
                self.add_triangle(here[0], next[1], next[0]);
            }
        }
        Ok(())
    }

    /// Duplicate every vertex with its normal negated and every triangle
    /// with reversed winding, so the surface renders from both sides.
    pub fn add_back_faces(&mut self) -> Result<(), MeshError> {
        let offset = u32::try_from(self.vertices.len()).map_err(|_| MeshError::TooManyVertices)?;
        offset.checked_mul(2).ok_or(MeshError::TooManyVertices)?;

        let flipped: Vec<Vertex> = self
            .vertices
            .iter()
            .map(|v| Vertex { normal: v.normal.map(|c| -c), ..*v })
            .collect();
        self.vertices.extend(flipped);

        let reversed: Vec<u32> = self
            .indices
            .chunks_exact(3)
            .flat_map(|t| [t[0] + offset, t[2] + offset, t[1] + offset])
            .collect();
        self.indices.extend(reversed);
        Ok(())
    }

    /// One triangle per face of a framed tessellation. Faces of negative
    /// orientation are wound the other way so all front faces agree.
    pub fn add_tessellation(&mut self, tess: &Tessellation<3>) -> Result<(), MeshError> {
        let frame = tess.frame().ok_or(MeshError::MissingFrame)?;
        if frame.geometry() != self.geometry {
            return Err(MeshError::GeometryMismatch);
        }
        let normal = Vec4::new(0.0, 0.0, 1.0, 0.0);
        let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];

        for face in tess.faces() {
            let mut corners = [0u32; 3];
            for (k, slot) in corners.iter_mut().enumerate() {
                let pos = *face.transform() * frame.corners()[k];
                *slot = self.add_vertex(pos, *face.transform() * normal, uvs[k])?;
            }
            let o = face.orientation().sign();
            let at = |step: i32| corners[(step * o).rem_euclid(3) as usize];
            self.add_triangle(at(0), at(1), at(2));
        }
        Ok(())
    }
}

/// First index of `count` vertices appended after `len` existing ones,
/// if every one of them still fits a `u32` index.
fn index_range(len: usize, count: usize) -> Result<u32, MeshError> {
    let end = len.checked_add(count).ok_or(MeshError::TooManyVertices)?;
    if end as u64 > u64::from(u32::MAX) + 1 {
        return Err(MeshError::TooManyVertices);
    }
    u32::try_from(len).map_err(|_| MeshError::TooManyVertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_indices_follow_insertion() {
        let mut b = ModelBuilder::new(Geometry::Spherical);
        let o = Geometry::Spherical.origin();
        let i0 = b.add_vertex(o, o, Vec2::zero()).unwrap();
        let i1 = b.add_vertex(o, o, Vec2::zero()).unwrap();
        assert_eq!((i0, i1), (0, 1));
        b.add_triangle(i0, i1, i0);
        let mesh = b.build();
        assert_eq!(mesh.indices(), &[0, 1, 0]);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let mut b = ModelBuilder::new(Geometry::Hyperbolic);
        let o = Geometry::Hyperbolic.origin();
        assert_eq!(b.add_polygon_face(&[o, o]), Err(MeshError::DegeneratePolygon { corners: 2 }));
        assert_eq!(
            b.add_prism(&Isometry::identity(), 2, 1.0, 1.0, 4),
            Err(MeshError::InvalidPrism { sides: 2, steps: 4 })
        );
        assert_eq!(b.num_vertices(), 0);
    }

    #[test]
    fn polygon_fan_starts_after_existing_vertices() {
        let g = Geometry::Hyperbolic;
        let mut b = ModelBuilder::new(g);
        let o = g.origin();
        b.add_vertex(o, o, Vec2::zero()).unwrap();
        let square: Vec<_> = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]
            .iter()
            .map(|&(x, y)| g.displacement(Vec3::new(x * 0.3, y * 0.3, 0.0)) * o)
            .collect();
        b.add_polygon_face(&square).unwrap();
        assert_eq!(b.build().indices(), &[1, 2, 3, 1, 3, 4]);
    }

    #[test]
    fn index_range_stops_at_u32() {
        assert_eq!(index_range(5, 3), Ok(5));
        let max = u32::MAX as usize;
        assert_eq!(index_range(max - 2, 3), Ok(u32::MAX - 2));
        assert_eq!(index_range(max - 1, 3), Err(MeshError::TooManyVertices));
        assert_eq!(index_range(max + 1, 1), Err(MeshError::TooManyVertices));
    }

    #[test]
    fn vertices_added_after_back_faces_get_fresh_indices() {
        let mut b = ModelBuilder::new(Geometry::Hyperbolic);
        let o = Geometry::Hyperbolic.origin();
        b.add_vertex(o, o, Vec2::zero()).unwrap();
        b.add_back_faces().unwrap();
        assert_eq!(b.add_vertex(o, o, Vec2::zero()).unwrap(), 2);
    }

    #[test]
    fn unframed_tessellation_has_no_mesh() {
        let mut t = Tessellation::new([2, 4, 5]).unwrap();
        t.grow(1).unwrap();
        let mut b = ModelBuilder::new(Geometry::Hyperbolic);
        assert_eq!(b.add_tessellation(&t), Err(MeshError::MissingFrame));
    }
}
