//! Shared helpers for horo benchmarks: seeded RNG, input generators.

use horo::{rotation, Geometry, Isometry, Mat4, Vec3, Vec4};

/// SplitMix64 stream, so every run sees identical inputs.
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in [-1, 1].
    pub fn f64(&mut self) -> f64 {
        // Top 53 bits give an exact f64 in [0, 1).
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        2.0 * unit - 1.0
    }

    pub fn vec3(&mut self) -> Vec3<f64> {
        Vec3::new(self.f64(), self.f64(), self.f64())
    }
}

pub fn make_rng() -> Rng {
    Rng::new(0xDEAD_BEEF_CAFE_BABE)
}

/// Tangent vectors at the origin with length up to `max_len`.
pub fn random_tangents(n: usize, max_len: f64) -> Vec<Vec3<f64>> {
    let mut rng = make_rng();
    (0..n).map(|_| rng.vec3() * (max_len / 3f64.sqrt())).collect()
}

/// Isometries `displacement · rotation` within distance ~2 of the identity.
pub fn random_isometries(geometry: Geometry, n: usize) -> Vec<Isometry> {
    let mut rng = make_rng();
    (0..n)
        .map(|_| {
            let turn = rotation(rng.vec3(), rng.f64() * std::f64::consts::PI);
            geometry.displacement(rng.vec3()) * turn
        })
        .collect()
}

/// Isometries with every entry perturbed by up to `noise`, as left behind
/// by long chains of floating-point products.
pub fn drifted_isometries(geometry: Geometry, n: usize, noise: f64) -> Vec<Mat4<f64>> {
    let mut rng = make_rng();
    random_isometries(geometry, n)
        .into_iter()
        .map(|m| m + Mat4::from_fn(|_, _| rng.f64() * noise))
        .collect()
}

/// Points of the model: images of the origin under random isometries.
pub fn random_points(geometry: Geometry, n: usize) -> Vec<Vec4<f64>> {
    random_isometries(geometry, n).into_iter().map(|m| m * geometry.origin()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_deterministic() {
        let a = random_isometries(Geometry::Hyperbolic, 4);
        let b = random_isometries(Geometry::Hyperbolic, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn isometries_are_isometries() {
        for g in [Geometry::Hyperbolic, Geometry::Spherical] {
            for m in random_isometries(g, 16) {
                assert!(g.is_isometry(&m, 1e-9), "{g:?}");
            }
            for p in random_points(g, 16) {
                assert!((g.sqr_norm(p) - g.sqr_norm(g.origin::<f64>())).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn drift_leaves_the_group() {
        let g = Geometry::Hyperbolic;
        let drifted = drifted_isometries(g, 8, 1e-3);
        assert!(drifted.iter().any(|m| !g.is_isometry(m, 1e-6)));
        for m in &drifted {
            assert!(g.is_isometry(&g.svd_unitary(m), 1e-9));
        }
    }

    #[test]
    fn tangents_respect_length() {
        assert!(random_tangents(64, 0.5).iter().all(|v| v.norm() <= 0.5 + 1e-12));
    }
}
