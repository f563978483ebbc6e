//! Restoring drifted poses to true isometries.
//!
//! A pose built by composing thousands of small steps slowly leaves the
//! isometry group. Two corrections are offered: a cheap Gram–Schmidt pass
//! for every frame, and a polar projection for larger excursions.

use crate::{Geometry, Mat4, Scalar, Svd4};

/// Iteration cap for the Denman–Beavers inverse square root.
pub const MAX_ROOT_ITERATIONS: usize = 50;

impl Geometry {
    /// Gram–Schmidt under the model form, columns `0..4` in order. In the
    /// hyperbolic model the three spacelike columns are fixed before the
    /// timelike one.
    ///
    /// `None` when a column's squared form-norm has the wrong sign or
    /// vanishes.
    pub fn try_qr_unitary<S: Scalar>(self, m: &Mat4<S>) -> Option<Mat4<S>> {
        let mut out = *m;
        for i in 0..4 {
            let sign = self.form_sign::<S>(i);
            let c = out.col(i);
            let n2 = sign * self.sqr_norm(c);
            if !n2.is_finite() || n2 <= S::EPSILON {
                return None;
            }
            let c = c / n2.sqrt();
            out.set_col(i, c);
            for j in (i + 1)..4 {
                let cj = out.col(j);
                out.set_col(j, cj - c * (self.dot(c, cj) * sign));
            }
        }
        Some(out)
    }

    /// Like [`Geometry::try_qr_unitary`], but falls back to the identity.
    pub fn qr_unitary<S: Scalar>(self, m: &Mat4<S>) -> Mat4<S> {
        self.try_qr_unitary(m).unwrap_or_else(Mat4::identity)
    }

    /// Nearest isometry to `m` by polar decomposition.
    ///
    /// Hyperbolic: `M · (Mᵗ_form M)^(-1/2)`. Spherical: `U Vᵗ` from the
    /// singular value decomposition. Falls back to [`Geometry::qr_unitary`]
    /// when the root iteration does not converge or `m` is rank-deficient.
    pub fn svd_unitary<S: Scalar>(self, m: &Mat4<S>) -> Mat4<S> {
        let polar = match self {
            Geometry::Hyperbolic => {
                let a = self.transpose(m) * *m;
                inverse_sqrt(&a).map(|z| *m * z)
            }
            Geometry::Spherical => Svd4::new(m).unitary(),
        };
        match polar {
            Some(u) if is_finite(&u) => u,
            _ => self.qr_unitary(m),
        }
    }

    /// `‖Mᵗ_form M − I‖_max ≤ tol`.
    pub fn is_isometry<S: Scalar>(self, m: &Mat4<S>, tol: S) -> bool {
        let err = (self.transpose(m) * *m).max_abs_diff(&Mat4::identity());
        err <= tol
    }
}

fn is_finite<S: Scalar>(m: &Mat4<S>) -> bool {
    (0..4).all(|c| {
        let v = m.col(c);
        v.x.is_finite() && v.y.is_finite() && v.z.is_finite() && v.w.is_finite()
    })
}

/// `A^(-1/2)` by the coupled Denman–Beavers iteration
/// (`Y₀ = A, Z₀ = I`, `Y ← (Y + Z⁻¹)/2`, `Z ← (Z + Y⁻¹)/2`, so `Y → A^½`
/// and `Z → A^(-½)`). Requires `A` to have no eigenvalues on the closed
/// negative real axis.
pub fn inverse_sqrt<S: Scalar>(a: &Mat4<S>) -> Option<Mat4<S>> {
    let scale = S::ONE.max(a.c0.max_abs().max(a.c1.max_abs()).max(a.c2.max_abs().max(a.c3.max_abs())));
    let tol = S::EPSILON * S::from_i32(100) * scale;
    let mut y = *a;
    let mut z = Mat4::identity();
    for _ in 0..MAX_ROOT_ITERATIONS {
        let y_inv = y.try_inverse()?;
        let z_inv = z.try_inverse()?;
        let y_next = (y + z_inv) * S::HALF;
        let z_next = (z + y_inv) * S::HALF;
        let delta = y_next.max_abs_diff(&y);
        y = y_next;
        z = z_next;
        if delta <= tol {
            return Some(z);
        }
    }
    None
}
