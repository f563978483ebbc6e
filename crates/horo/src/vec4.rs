use crate::{Scalar, Vec3};
use core::ops::{Index, IndexMut};

/// Homogeneous model coordinate: a point on the hyperboloid or 3-sphere,
/// a tangent direction, or a (dual) face normal.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4<S> {
    pub x: S,
    pub y: S,
    pub z: S,
    pub w: S,
}

impl<S: Scalar> Vec4<S> {
    #[inline]
    pub fn new(x: S, y: S, z: S, w: S) -> Self { Self { x, y, z, w } }

    #[inline]
    pub fn zero() -> Self { Self::new(S::ZERO, S::ZERO, S::ZERO, S::ZERO) }

    #[inline]
    pub fn splat(v: S) -> Self { Self::new(v, v, v, v) }

    #[inline]
    pub fn from_array(a: [S; 4]) -> Self { Self::new(a[0], a[1], a[2], a[3]) }

    #[inline]
    pub fn to_array(self) -> [S; 4] { [self.x, self.y, self.z, self.w] }

    /// Single-precision copy for uniform and vertex upload.
    #[inline]
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.x.to_f64() as f32,
            self.y.to_f64() as f32,
            self.z.to_f64() as f32,
            self.w.to_f64() as f32,
        ]
    }

    /// Euclidean dot product. The model forms live on [`crate::Geometry`].
    #[inline]
    pub fn dot(self, rhs: Self) -> S {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    #[inline]
    pub fn norm_sq(self) -> S { self.dot(self) }

    #[inline]
    pub fn norm(self) -> S { self.norm_sq().sqrt() }

    #[inline]
    pub fn max_abs(self) -> S {
        self.x.abs().max(self.y.abs()).max(self.z.abs().max(self.w.abs()))
    }

    /// Spatial part, dropping `w`.
    #[inline]
    pub fn truncate(self) -> Vec3<S> { Vec3::new(self.x, self.y, self.z) }

    /// Generalized cross product of three 4-vectors: the cofactor vector of
    /// the 3×4 matrix with rows `a`, `b`, `c`. Euclidean-orthogonal to all three.
    pub fn cross3(a: Self, b: Self, c: Self) -> Self {
        let x = a.y * b.z * c.w + a.z * b.w * c.y + a.w * b.y * c.z
            - a.y * b.w * c.z - a.z * b.y * c.w - a.w * b.z * c.y;
        let y = a.x * b.z * c.w + a.z * b.w * c.x + a.w * b.x * c.z
            - a.x * b.w * c.z - a.z * b.x * c.w - a.w * b.z * c.x;
        let z = a.x * b.y * c.w + a.y * b.w * c.x + a.w * b.x * c.y
            - a.x * b.w * c.y - a.y * b.x * c.w - a.w * b.y * c.x;
        let w = a.x * b.y * c.z + a.y * b.z * c.x + a.z * b.x * c.y
            - a.x * b.z * c.y - a.y * b.x * c.z - a.z * b.y * c.x;
        Self::new(x, -y, z, -w)
    }
}

impl<S> Index<usize> for Vec4<S> {
    type Output = S;
    #[inline]
    fn index(&self, i: usize) -> &S {
        match i { 0 => &self.x, 1 => &self.y, 2 => &self.z, 3 => &self.w, _ => panic!("no component {i} in a Vec4") }
    }
}

impl<S> IndexMut<usize> for Vec4<S> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut S {
        match i {
            0 => &mut self.x, 1 => &mut self.y, 2 => &mut self.z, 3 => &mut self.w,
            _ => panic!("no component {i} in a Vec4"),
        }
    }
}

fieldwise_ops!(Vec4 { x, y, z, w });
