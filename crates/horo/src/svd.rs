use crate::{Mat4, Scalar, Vec4};

/// Singular value decomposition of a 4×4 matrix: `A = U · diag(σ) · Vᵗ`.
///
/// One-sided Jacobi: plane rotations orthogonalize the columns of `A`
/// while the same rotations accumulate into `V`. Singular values come out
/// unsorted, in column order.
#[derive(Clone, Copy, Debug)]
pub struct Svd4<S> {
    /// Left singular vectors. A column whose σ vanished is left unnormalized.
    pub u: Mat4<S>,
    pub sigma: Vec4<S>,
    /// Right singular vectors (not transposed).
    pub v: Mat4<S>,
}

const MAX_SWEEPS: usize = 60;

impl<S: Scalar> Svd4<S> {
    pub fn new(a: &Mat4<S>) -> Self {
        let mut u = *a;
        let mut v = Mat4::identity();
        let tol = S::EPSILON * S::from_i32(10);

        for _ in 0..MAX_SWEEPS {
            let mut converged = true;

            for p in 0..4 {
                for q in (p + 1)..4 {
                    let (up, uq) = (u.col(p), u.col(q));
                    let app = up.norm_sq();
                    let aqq = uq.norm_sq();
                    let apq = up.dot(uq);

                    if apq.abs() <= tol * (app * aqq).sqrt() {
                        continue;
                    }
                    converged = false;

                    let tau = (aqq - app) / (S::TWO * apq);
                    let t = if tau >= S::ZERO {
                        (tau + (S::ONE + tau * tau).sqrt()).recip()
                    } else {
                        -((-tau) + (S::ONE + tau * tau).sqrt()).recip()
                    };
                    let c = (S::ONE + t * t).sqrt().recip();
                    let s = t * c;

                    rotate_cols(&mut u, p, q, c, s);
                    rotate_cols(&mut v, p, q, c, s);
                }
            }

            if converged { break; }
        }

        let mut sigma = Vec4::zero();
        for j in 0..4 {
            let n = u.col(j).norm();
            sigma[j] = n;
            if n > S::EPSILON {
                u.set_col(j, u.col(j) / n);
            }
        }

        Svd4 { u, sigma, v }
    }

    /// Smallest singular value.
    pub fn min_sigma(&self) -> S {
        self.sigma.x.min(self.sigma.y).min(self.sigma.z.min(self.sigma.w))
    }

    /// Orthogonal polar factor `U Vᵗ`, the nearest orthogonal matrix to
    /// `A`. `None` if `A` is numerically rank-deficient.
    pub fn unitary(&self) -> Option<Mat4<S>> {
        let scale = self.sigma.max_abs();
        if !(self.min_sigma() > scale * S::EPSILON * S::from_i32(16)) {
            return None;
        }
        Some(self.u * self.v.transpose())
    }

    /// `U · diag(σ) · Vᵗ`
    pub fn reconstruct(&self) -> Mat4<S> {
        self.u * Mat4::from_diagonal(self.sigma) * self.v.transpose()
    }
}

fn rotate_cols<S: Scalar>(m: &mut Mat4<S>, p: usize, q: usize, c: S, s: S) {
    let (mp, mq) = (m.col(p), m.col(q));
    m.set_col(p, mp * c - mq * s);
    m.set_col(q, mp * s + mq * c);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat4<f64> {
        Mat4::new(
            4.0, 1.0, 0.0, 2.0,
            0.5, 3.0, 1.0, 0.0,
            0.0, 1.0, 2.0, 1.0,
            1.0, 0.0, 0.5, 5.0,
        )
    }

    #[test]
    fn reconstructs_input() {
        let a = sample();
        let svd = Svd4::new(&a);
        let diff = svd.reconstruct().max_abs_diff(&a);
        assert!(diff < 1e-10, "reconstruction error {}", diff);
    }

    #[test]
    fn factors_are_orthogonal() {
        let svd = Svd4::new(&sample());
        let id = Mat4::<f64>::identity();
        assert!((svd.u.transpose() * svd.u).max_abs_diff(&id) < 1e-10);
        assert!((svd.v.transpose() * svd.v).max_abs_diff(&id) < 1e-10);
        assert!(svd.min_sigma() > 0.0);
    }

    #[test]
    fn unitary_of_scaled_rotation() {
        let r = crate::rotation(crate::Vec3::new(1.0, 1.0, 0.0), 0.7);
        let svd = Svd4::new(&(r * 2.5));
        let q = svd.unitary().unwrap();
        assert!(q.max_abs_diff(&r) < 1e-10);
        for j in 0..4 {
            assert!((svd.sigma[j] - 2.5).abs() < 1e-10);
        }
    }

    #[test]
    fn rank_deficient_has_no_unitary() {
        let mut a = sample();
        a.set_col(2, Vec4::zero());
        assert!(Svd4::new(&a).unitary().is_none());
    }
}
