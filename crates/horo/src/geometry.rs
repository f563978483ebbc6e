//! Isometry algebra for the two curved models.
//!
//! Both models live in ℝ⁴. Hyperbolic space is the upper sheet of
//! `x² + y² + z² - w² = -1` under the Minkowski form `diag(1, 1, 1, -1)`;
//! spherical space is the unit 3-sphere under the Euclidean form. Every
//! formula below differs between the two only by the sign of the `w` axis
//! and by `sinh/cosh` versus `sin/cos`, so one [`Geometry`] value selects
//! the branch instead of two parallel function families.

use crate::{Mat4, Scalar, Vec3, Vec4};

/// Norms below this are treated as zero by [`Geometry::displacement`].
pub const DISPLACEMENT_EPS: f64 = 1e-30;

/// Curvature sign of the model space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Geometry {
    #[default]
    Hyperbolic,
    Spherical,
}

impl Geometry {
    #[inline]
    pub fn is_hyperbolic(self) -> bool { self == Geometry::Hyperbolic }

    /// Signature of basis axis `i` under the model form: `-1` for the
    /// hyperbolic time axis (`i == 3`), `+1` otherwise.
    #[inline]
    pub fn form_sign<S: Scalar>(self, i: usize) -> S {
        if self.is_hyperbolic() && i == 3 { -S::ONE } else { S::ONE }
    }

    /// `J v`: flips the time component in the hyperbolic model.
    #[inline]
    pub fn dual<S: Scalar>(self, v: Vec4<S>) -> Vec4<S> {
        Vec4::new(v.x, v.y, v.z, v.w * self.form_sign(3))
    }

    /// The model's bilinear form.
    #[inline]
    pub fn dot<S: Scalar>(self, u: Vec4<S>, v: Vec4<S>) -> S {
        u.dot(self.dual(v))
    }

    #[inline]
    pub fn sqr_norm<S: Scalar>(self, v: Vec4<S>) -> S { self.dot(v, v) }

    /// Rescale `v` so that `|sqr_norm(v)| == 1`. Leaves null vectors alone.
    pub fn normalize<S: Scalar>(self, v: Vec4<S>) -> Vec4<S> {
        let n = self.sqr_norm(v).abs();
        if n > S::EPSILON { v / n.sqrt() } else { v }
    }

    /// The fixed base point `(0, 0, 0, 1)` shared by both models.
    #[inline]
    pub fn origin<S: Scalar>(self) -> Vec4<S> {
        Vec4::new(S::ZERO, S::ZERO, S::ZERO, S::ONE)
    }

    /// `sinh` or `sin`.
    #[inline]
    pub fn sin_like<S: Scalar>(self, t: S) -> S {
        match self { Geometry::Hyperbolic => t.sinh(), Geometry::Spherical => t.sin() }
    }

    /// `cosh` or `cos`.
    #[inline]
    pub fn cos_like<S: Scalar>(self, t: S) -> S {
        match self { Geometry::Hyperbolic => t.cosh(), Geometry::Spherical => t.cos() }
    }

    /// Geodesic distance between two model points.
    pub fn distance<S: Scalar>(self, p: Vec4<S>, q: Vec4<S>) -> S {
        match self {
            Geometry::Hyperbolic => (-self.dot(p, q)).max(S::ONE).acosh(),
            Geometry::Spherical => self.dot(p, q).max(-S::ONE).min(S::ONE).acos(),
        }
    }

    /// Isometric transpose `J Mᵗ J`. Equals `M⁻¹` for an isometry, without
    /// the cancellation a general inverse suffers on far-out poses.
    pub fn transpose<S: Scalar>(self, m: &Mat4<S>) -> Mat4<S> {
        Mat4::from_fn(|r, c| m.get(c, r) * self.form_sign(r) * self.form_sign(c))
    }

    /// The isometry taking the origin to the model point `p` along the
    /// geodesic joining them. Undefined at the spherical antipode `w = -1`.
    pub fn translation<S: Scalar>(self, p: Vec4<S>) -> Mat4<S> {
        let k = self.form_sign::<S>(3) * -S::ONE;
        let f = k / (p.w + S::ONE);
        let mut m = Mat4::identity();
        for r in 0..3 {
            for c in 0..3 {
                m.set(r, c, m.get(r, c) + p[r] * p[c] * f);
            }
            m.set(r, 3, p[r]);
            m.set(3, r, k * p[r]);
        }
        m.set(3, 3, p.w);
        m
    }

    /// Move the origin along direction `v` by arc length `‖v‖`.
    ///
    /// Exactly the identity when `‖v‖ < 1e-30`.
    pub fn displacement<S: Scalar>(self, v: Vec3<S>) -> Mat4<S> {
        let norm = v.norm();
        if !norm.is_finite() || norm.to_f64() < DISPLACEMENT_EPS {
            return Mat4::identity();
        }
        let u = v / norm;
        let c = self.cos_like(norm);
        let s = self.sin_like(norm);
        let k = self.form_sign::<S>(3) * -S::ONE;
        let u = [u.x, u.y, u.z];
        let mut m = Mat4::identity();
        for r in 0..3 {
            for col in 0..3 {
                m.set(r, col, m.get(r, col) + (c - S::ONE) * u[r] * u[col]);
            }
            m.set(r, 3, s * u[r]);
            m.set(3, r, k * s * u[r]);
        }
        m.set(3, 3, c);
        m
    }

    /// Reflection in the hyperplane with unit normal `n`: `I - 2 n (J n)ᵗ`.
    pub fn reflection<S: Scalar>(self, n: Vec4<S>) -> Mat4<S> {
        Mat4::identity() - Mat4::outer(n, self.dual(n)) * S::TWO
    }

    /// Normal of the hyperplane through the origin spanned by three vectors,
    /// orthogonal to each of them under the model form. Not normalized.
    pub fn normal<S: Scalar>(self, p0: Vec4<S>, p1: Vec4<S>, p2: Vec4<S>) -> Vec4<S> {
        self.dual(Vec4::cross3(p0, p1, p2))
    }
}

/// Axis-angle rotation in the upper-left 3×3 block. The axis need not be
/// unit length; a zero axis gives the identity.
pub fn rotation<S: Scalar>(axis: Vec3<S>, angle: S) -> Mat4<S> {
    let Some(a) = axis.try_normalize() else { return Mat4::identity() };
    let (x, y, z) = (a.x, a.y, a.z);
    let (c, s) = (angle.cos(), angle.sin());
    let t = S::ONE - c;
    Mat4::new(
        x * x + (S::ONE - x * x) * c, x * y * t - z * s,            z * x * t + y * s,            S::ZERO,
        x * y * t + z * s,            y * y + (S::ONE - y * y) * c, y * z * t - x * s,            S::ZERO,
        z * x * t - y * s,            y * z * t + x * s,            z * z + (S::ONE - z * z) * c, S::ZERO,
        S::ZERO,                      S::ZERO,                      S::ZERO,                      S::ONE,
    )
}

/// Parabolic isometry of the hyperboloid fixing the ideal point
/// `(0, 0, -1, 1)`. Moves along the horosphere through the origin:
/// `horo_rotation(a, b) · horo_rotation(c, d) == horo_rotation(a + c, b + d)`.
pub fn horo_rotation<S: Scalar>(x: S, y: S) -> Mat4<S> {
    let s = S::HALF * (x * x + y * y);
    let (o, z) = (S::ONE, S::ZERO);
    Mat4::new(
        o,  z,  x,     x,
        z,  o,  y,     y,
        -x, -y, o - s, -s,
        x,  y,  s,     s + o,
    )
}

/// OpenGL-style projection with half-extents `x/2`, `y/2` at unit depth.
pub fn perspective<S: Scalar>(x: S, y: S, near: S, far: S) -> Mat4<S> {
    let (z, two) = (S::ZERO, S::TWO);
    let depth = far - near;
    Mat4::new(
        two / x, z,       z,                    z,
        z,       two / y, z,                    z,
        z,       z,       -(far + near) / depth, -two * far * near / depth,
        z,       z,       -S::ONE,              z,
    )
}

/// Plain affine translation, for screen-space helpers outside the model.
pub fn euclidean_translation<S: Scalar>(v: Vec3<S>) -> Mat4<S> {
    let mut m = Mat4::identity();
    m.set_col(3, v.extend(S::ONE));
    m
}
