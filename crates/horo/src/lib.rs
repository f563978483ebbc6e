//! horo — isometry algebra for curved 3-spaces
//!
//! Hyperbolic space in the hyperboloid model and spherical space on the
//! unit 3-sphere, both as 4×4 matrices acting on ℝ⁴. The same API serves
//! both: a [`Geometry`] value picks the bilinear form and the
//! `sinh/cosh` or `sin/cos` flavour of every formula.
//!
//! # Layout
//! - [`Scalar`], [`Vec2`], [`Vec3`], [`Vec4`], [`Mat4`]: plain value types,
//!   `#[repr(C)]` for GPU upload
//! - [`Geometry`]: forms, transpose, displacement, reflection, normals
//! - [`Geometry::qr_unitary`] / [`Geometry::svd_unitary`]: drift correction
//! - [`Svd4`]: fixed-size Jacobi SVD backing the spherical polar projection

#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Fieldwise arithmetic for the small vector types.
macro_rules! fieldwise_ops {
    ($V:ident { $($f:ident),+ }) => {
        impl<S: Scalar> core::ops::Add for $V<S> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self { $V { $($f: self.$f + rhs.$f),+ } }
        }
        impl<S: Scalar> core::ops::Sub for $V<S> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self { $V { $($f: self.$f - rhs.$f),+ } }
        }
        impl<S: Scalar> core::ops::Neg for $V<S> {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self { $V { $($f: -self.$f),+ } }
        }
        impl<S: Scalar> core::ops::Mul<S> for $V<S> {
            type Output = Self;
            #[inline]
            fn mul(self, k: S) -> Self { $V { $($f: self.$f * k),+ } }
        }
        impl<S: Scalar> core::ops::Div<S> for $V<S> {
            type Output = Self;
            #[inline]
            fn div(self, k: S) -> Self { $V { $($f: self.$f / k),+ } }
        }
        impl<S: Scalar> core::ops::AddAssign for $V<S> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
        }
        impl<S: Scalar> core::ops::SubAssign for $V<S> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
        }
        impl<S: Scalar> core::ops::MulAssign<S> for $V<S> {
            #[inline]
            fn mul_assign(&mut self, k: S) { *self = *self * k; }
        }
        impl<S: Scalar> Default for $V<S> {
            fn default() -> Self { $V { $($f: S::ZERO),+ } }
        }
    };
}

mod scalar;
mod vec2;
mod vec3;
mod vec4;
mod mat4;
mod geometry;
mod stabilize;
mod svd;

pub use scalar::Scalar;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat4::Mat4;
pub use geometry::{
    euclidean_translation, horo_rotation, perspective, rotation, Geometry, DISPLACEMENT_EPS,
};
pub use stabilize::{inverse_sqrt, MAX_ROOT_ITERATIONS};
pub use svd::Svd4;

/// Double-precision isometry, the type every pose is kept in.
pub type Isometry = Mat4<f64>;

// Bytemuck impls for concrete f32/f64 types (generic structs can't derive Pod)
#[cfg(feature = "bytemuck")]
mod bytemuck_impls {
    use super::*;

    macro_rules! impl_pod {
        ($($t:ty),* $(,)?) => {
            $(
                // SAFETY: All fields are the same float type, #[repr(C)], no padding
                unsafe impl bytemuck::Zeroable for $t {}
                unsafe impl bytemuck::Pod for $t {}
            )*
        };
    }

    impl_pod!(
        Vec2<f32>, Vec2<f64>,
        Vec3<f32>, Vec3<f64>,
        Vec4<f32>, Vec4<f64>,
        Mat4<f32>, Mat4<f64>,
    );
}
