use crate::TessellationError;
use horo::{Geometry, Isometry, Vec4};
use std::f64::consts::PI;

/// Below this the third mirror is treated as lightlike and the triangle
/// as Euclidean.
const CLOSURE_EPS: f64 = 1e-9;

/// Model-space placement of the seed polygon.
///
/// Mirror `e` is the hyperplane through edge `e`; corner `k` lies on mirrors
/// `k + 1` and `k + 2`. Reflecting a face's transform in a mirror gives
/// the transform of the neighbour across that edge.
#[derive(Clone, Debug)]
pub struct CoxeterFrame<const N: usize> {
    geometry: Geometry,
    mirrors: [Vec4<f64>; N],
    corners: [Vec4<f64>; N],
    reflections: [Isometry; N],
}

impl<const N: usize> CoxeterFrame<N> {
    #[inline]
    pub fn geometry(&self) -> Geometry { self.geometry }

    /// Unit normals of the edge mirrors, pointing away from the seed face.
    #[inline]
    pub fn mirrors(&self) -> &[Vec4<f64>; N] { &self.mirrors }

    /// Seed-face corners on the model surface.
    #[inline]
    pub fn corners(&self) -> &[Vec4<f64>; N] { &self.corners }

    #[inline]
    pub fn reflection(&self, edge: usize) -> &Isometry { &self.reflections[edge] }
}

impl CoxeterFrame<3> {
    /// Triangle with corner angles `π / shape[k]` in the `z = 0` plane.
    ///
    /// Mirror normals `n₀, n₁, n₂` are built from their Gram matrix
    /// `⟨nᵢ, nⱼ⟩ = -cos(π / shape[3 - i - j])`: `n₀` along x, `n₁` in the
    /// xy-plane, `n₂` picks up the `w` component that the angle sum demands.
    pub fn new(shape: [u32; 3], geometry: Geometry) -> Result<Self, TessellationError> {
        let invalid = |reason| TessellationError::InvalidShape { shape: shape.to_vec(), reason };
        if shape.iter().any(|&m| m < 2) {
            return Err(invalid("every corner multiplicity must be at least 2"));
        }
        let gram = |i: usize, j: usize| -(PI / shape[3 - i - j] as f64).cos();
        let (g01, g02, g12) = (gram(0, 1), gram(0, 2), gram(1, 2));

        let n1y = (1.0 - g01 * g01).sqrt();
        let x = g02;
        let y = (g12 - g02 * g01) / n1y;
        let w2 = match geometry {
            Geometry::Hyperbolic => x * x + y * y - 1.0,
            Geometry::Spherical => 1.0 - x * x - y * y,
        };
        if !(w2 > CLOSURE_EPS) {
            return Err(invalid(match geometry {
                Geometry::Hyperbolic => "angle sum too large for a hyperbolic triangle",
                Geometry::Spherical => "angle sum too small for a spherical triangle",
            }));
        }

        let mut mirrors = [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(g01, n1y, 0.0, 0.0),
            Vec4::new(x, y, 0.0, w2.sqrt()),
        ];
        let ez = Vec4::new(0.0, 0.0, 1.0, 0.0);
        let mut corners = [Vec4::zero(); 3];
        for (k, corner) in corners.iter_mut().enumerate() {
            let p = geometry.normalize(geometry.normal(mirrors[(k + 1) % 3], mirrors[(k + 2) % 3], ez));
            *corner = if geometry.dot(p, mirrors[k]) > 0.0 { -p } else { p };
        }
        // Keep the face on the future-pointing sheet.
        if geometry.is_hyperbolic() && corners[0].w < 0.0 {
            for p in corners.iter_mut().chain(mirrors.iter_mut()) {
                *p = -*p;
            }
        }

        let reflections = mirrors.map(|n| geometry.reflection(n));
        Ok(Self { geometry, mirrors, corners, reflections })
    }
}
