use crate::{Scalar, Vec4};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

/// Column-major 4×4 matrix.
///
/// Holds isometries of the hyperboloid and spherical models as well as the
/// (geometry-free) projection matrix handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4<S> {
    pub c0: Vec4<S>,
    pub c1: Vec4<S>,
    pub c2: Vec4<S>,
    pub c3: Vec4<S>,
}

impl<S: Scalar> Mat4<S> {
    /// Entries are given row by row, the way the matrix is read on paper.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub fn new(
        a: S, b: S, c: S, d: S,
        e: S, f: S, g: S, h: S,
        i: S, j: S, k: S, l: S,
        m: S, n: S, o: S, p: S,
    ) -> Self {
        Self::from_rows([[a, b, c, d], [e, f, g, h], [i, j, k, l], [m, n, o, p]])
    }

    #[inline]
    pub fn from_cols(c0: Vec4<S>, c1: Vec4<S>, c2: Vec4<S>, c3: Vec4<S>) -> Self {
        Self { c0, c1, c2, c3 }
    }

    /// Build from a row-major `m[row][col]` array.
    pub fn from_rows(m: [[S; 4]; 4]) -> Self {
        let col = |c: usize| Vec4::new(m[0][c], m[1][c], m[2][c], m[3][c]);
        Self::from_cols(col(0), col(1), col(2), col(3))
    }

    /// Build element-wise from `f(row, col)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> S) -> Self {
        let mut rows = [[S::ZERO; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, x) in row.iter_mut().enumerate() {
                *x = f(r, c);
            }
        }
        Self::from_rows(rows)
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_rows([[S::ZERO; 4]; 4])
    }

    #[inline]
    pub fn identity() -> Self {
        Self::from_diagonal(Vec4::splat(S::ONE))
    }

    #[inline]
    pub fn from_diagonal(d: Vec4<S>) -> Self {
        Self::from_fn(|r, c| if r == c { d[r] } else { S::ZERO })
    }

    /// Outer product `a bᵗ`.
    pub fn outer(a: Vec4<S>, b: Vec4<S>) -> Self {
        Self::from_cols(a * b.x, a * b.y, a * b.z, a * b.w)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> S {
        self.col(col)[row]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: S) {
        self.col_mut(col)[row] = value;
    }

    #[inline]
    pub fn col(&self, i: usize) -> Vec4<S> {
        match i { 0 => self.c0, 1 => self.c1, 2 => self.c2, _ => self.c3 }
    }

    #[inline]
    pub fn col_mut(&mut self, i: usize) -> &mut Vec4<S> {
        match i { 0 => &mut self.c0, 1 => &mut self.c1, 2 => &mut self.c2, _ => &mut self.c3 }
    }

    #[inline]
    pub fn set_col(&mut self, i: usize, v: Vec4<S>) {
        *self.col_mut(i) = v;
    }

    #[inline]
    pub fn row(&self, i: usize) -> Vec4<S> {
        Vec4::new(self.c0[i], self.c1[i], self.c2[i], self.c3[i])
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2), self.row(3))
    }

    /// Linear combination of the columns weighted by `v`.
    #[inline]
    pub fn mul_vec4(&self, v: Vec4<S>) -> Vec4<S> {
        (0..4).fold(Vec4::zero(), |acc, i| acc + self.col(i) * v[i])
    }

    pub fn mul_mat(&self, rhs: &Mat4<S>) -> Mat4<S> {
        rhs.map_cols(|c| self.mul_vec4(c))
    }

    /// Largest absolute entry of `self - rhs`.
    pub fn max_abs_diff(&self, rhs: &Mat4<S>) -> S {
        let d = *self - *rhs;
        d.c0.max_abs().max(d.c1.max_abs()).max(d.c2.max_abs().max(d.c3.max_abs()))
    }

    /// Column-major single-precision copy, as shader uniforms expect.
    pub fn to_f32_cols(&self) -> [[f32; 4]; 4] {
        [
            self.c0.to_f32_array(),
            self.c1.to_f32_array(),
            self.c2.to_f32_array(),
            self.c3.to_f32_array(),
        ]
    }

    /// Inverse by Gauss–Jordan elimination with partial pivoting.
    ///
    /// `None` when a pivot falls below a few ulps of the largest entry,
    /// or when the input is not finite.
    pub fn try_inverse(&self) -> Option<Self> {
        let mut a = [[S::ZERO; 4]; 4];
        let mut scale = S::ZERO;
        for (r, row) in a.iter_mut().enumerate() {
            for (c, x) in row.iter_mut().enumerate() {
                *x = self.get(r, c);
                if !x.is_finite() {
                    return None;
                }
                scale = scale.max(x.abs());
            }
        }
        if scale == S::ZERO {
            return None;
        }
        let tolerance = S::from_i32(64) * S::EPSILON * scale;
        let mut inv = [[S::ZERO; 4]; 4];
        for (i, row) in inv.iter_mut().enumerate() {
            row[i] = S::ONE;
        }

        for k in 0..4 {
            let pivot = (k..4).fold(k, |best, r| if a[r][k].abs() > a[best][k].abs() { r } else { best });
            if a[pivot][k].abs() <= tolerance {
                return None;
            }
            a.swap(k, pivot);
            inv.swap(k, pivot);

            let p = a[k][k].recip();
            for c in 0..4 {
                a[k][c] = a[k][c] * p;
                inv[k][c] = inv[k][c] * p;
            }
            a[k][k] = S::ONE;
            for r in (0..4).filter(|&r| r != k) {
                let f = a[r][k];
                if f == S::ZERO {
                    continue;
                }
                for c in 0..4 {
                    a[r][c] = a[r][c] - f * a[k][c];
                    inv[r][c] = inv[r][c] - f * inv[k][c];
                }
                a[r][k] = S::ZERO;
            }
        }
        Some(Self::from_rows(inv))
    }

    fn map_cols(self, mut f: impl FnMut(Vec4<S>) -> Vec4<S>) -> Self {
        Self::from_cols(f(self.c0), f(self.c1), f(self.c2), f(self.c3))
    }

    fn zip_cols(self, rhs: Self, mut f: impl FnMut(Vec4<S>, Vec4<S>) -> Vec4<S>) -> Self {
        Self::from_cols(f(self.c0, rhs.c0), f(self.c1, rhs.c1), f(self.c2, rhs.c2), f(self.c3, rhs.c3))
    }
}

impl<S: Scalar> Default for Mat4<S> {
    fn default() -> Self { Self::identity() }
}

macro_rules! columnwise {
    ($($trait:ident :: $method:ident => $op:tt),*) => {$(
        impl<S: Scalar> $trait for Mat4<S> {
            type Output = Self;
            #[inline]
            fn $method(self, rhs: Self) -> Self { self.zip_cols(rhs, |a, b| a $op b) }
        }
    )*};
}

columnwise!(Add::add => +, Sub::sub => -);

impl<S: Scalar> AddAssign for Mat4<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}

impl<S: Scalar> Neg for Mat4<S> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self { self.map_cols(|c| -c) }
}

impl<S: Scalar> Mul<S> for Mat4<S> {
    type Output = Self;
    #[inline]
    fn mul(self, k: S) -> Self { self.map_cols(|c| c * k) }
}

impl<S: Scalar> Mul<Vec4<S>> for Mat4<S> {
    type Output = Vec4<S>;
    #[inline]
    fn mul(self, v: Vec4<S>) -> Vec4<S> { self.mul_vec4(v) }
}

impl<S: Scalar> Mul for Mat4<S> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self { self.mul_mat(&rhs) }
}

// `pose *= step` composes in the local frame.
impl<S: Scalar> MulAssign for Mat4<S> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) { *self = self.mul_mat(&rhs); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat4<f64> {
        Mat4::new(
            2.0, 0.5, 0.0, 1.0,
            0.0, 1.0, 3.0, 0.0,
            1.0, 0.0, 1.0, 0.5,
            0.0, 2.0, 0.0, 1.0,
        )
    }

    #[test]
    fn row_major_constructor() {
        let m = sample();
        assert_eq!(m.get(0, 3), 1.0);
        assert_eq!(m.get(3, 1), 2.0);
        assert_eq!(m.row(1), Vec4::new(0.0, 1.0, 3.0, 0.0));
        assert_eq!(m.col(2), Vec4::new(0.0, 3.0, 1.0, 0.0));
        assert_eq!(Mat4::from_rows([
            [2.0, 0.5, 0.0, 1.0],
            [0.0, 1.0, 3.0, 0.0],
            [1.0, 0.0, 1.0, 0.5],
            [0.0, 2.0, 0.0, 1.0],
        ]), m);
    }

    #[test]
    fn inverse_roundtrip() {
        let m = sample();
        let inv = m.try_inverse().unwrap();
        let err = (m * inv).max_abs_diff(&Mat4::identity());
        assert!(err < 1e-12, "m * m^-1 off identity by {err}");
        assert!((inv * m).max_abs_diff(&Mat4::identity()) < 1e-12);
    }

    #[test]
    fn inverse_needs_pivoting() {
        // Zero in the leading position.
        let m = Mat4::new(
            0.0, 1.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 2.0,
            0.0, 0.0, 4.0, 0.0,
        );
        let inv = m.try_inverse().unwrap();
        assert_eq!(inv.get(3, 2), 0.5);
        assert_eq!(inv.get(2, 3), 0.25);
    }

    #[test]
    fn singular_has_no_inverse() {
        let mut m = sample();
        m.set_col(3, m.c0 * 2.0);
        assert!(m.try_inverse().is_none());
    }

    #[test]
    fn outer_and_transpose() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0_f64);
        let b = Vec4::new(0.0, 1.0, 0.0, -1.0);
        let o = Mat4::outer(a, b);
        assert_eq!(o.get(2, 3), -3.0);
        assert_eq!(o.transpose(), Mat4::outer(b, a));
        assert_eq!(o.mul_vec4(b), a * 2.0);
    }

    #[test]
    fn mul_assign_composes_on_the_right() {
        let a = sample();
        let b = Mat4::from_diagonal(Vec4::new(1.0, 2.0, 3.0, 4.0));
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
        assert_eq!(c.max_abs_diff(&(a * b)), 0.0);
        assert_eq!(c.get(1, 2), 9.0);
    }
}
