use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Floating-point scalar the isometry algebra is written against.
///
/// Implemented for f32 and f64. The kernel needs the hyperbolic functions
/// alongside the circular ones, since every formula comes in a
/// `sinh/cosh` and a `sin/cos` flavour.
pub trait Scalar:
    Copy + Default + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
    + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
    + Mul<Output = Self> + Div<Output = Self>
    + AddAssign + SubAssign + MulAssign + DivAssign
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;
    const PI: Self;
    const TAU: Self;
    const EPSILON: Self;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn recip(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn is_finite(self) -> bool;

    // Circular and hyperbolic flavours of each model formula.
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn acos(self) -> Self;
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn acosh(self) -> Self;

    /// Lossy for `f32`.
    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
    fn from_i32(v: i32) -> Self;
}

// std builds call the inherent float methods; no_std builds go through libm.
#[cfg(feature = "std")]
mod float_ops {
    macro_rules! unary {
        ($($name:ident),* $(,)?) => {
            ::paste::paste! {
                $(
                    #[inline(always)]
                    pub fn [<$name _f32>](x: f32) -> f32 { x.$name() }
                    #[inline(always)]
                    pub fn [<$name _f64>](x: f64) -> f64 { x.$name() }
                )*
            }
        };
    }

    unary!(sqrt, abs, sin, cos, tan, acos, sinh, cosh, acosh);
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod float_ops {
    macro_rules! unary {
        ($($name:ident => $f32:ident, $f64:ident);* $(;)?) => {
            ::paste::paste! {
                $(
                    #[inline(always)]
                    pub fn [<$name _f32>](x: f32) -> f32 { libm::$f32(x) }
                    #[inline(always)]
                    pub fn [<$name _f64>](x: f64) -> f64 { libm::$f64(x) }
                )*
            }
        };
    }

    unary! {
        sqrt => sqrtf, sqrt;
        abs => fabsf, fabs;
        sin => sinf, sin;
        cos => cosf, cos;
        tan => tanf, tan;
        acos => acosf, acos;
        sinh => sinhf, sinh;
        cosh => coshf, cosh;
        acosh => acoshf, acosh;
    }
}

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("horo needs either the `std` or the `libm` feature for float math");

macro_rules! impl_scalar_float {
    ($t:ident: $($unary:ident),*) => {
        ::paste::paste! {
            impl Scalar for $t {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const TWO: Self = 2.0;
                const HALF: Self = 0.5;
                const PI: Self = core::$t::consts::PI;
                const TAU: Self = core::$t::consts::TAU;
                const EPSILON: Self = $t::EPSILON;

                $(
                    #[inline]
                    fn $unary(self) -> Self { float_ops::[<$unary _ $t>](self) }
                )*

                #[inline]
                fn min(self, other: Self) -> Self { if other < self { other } else { self } }
                #[inline]
                fn max(self, other: Self) -> Self { if other > self { other } else { self } }
                #[inline]
                fn recip(self) -> Self { Self::ONE / self }
                #[inline]
                fn is_finite(self) -> bool { $t::is_finite(self) }

                #[inline]
                fn from_f64(v: f64) -> Self { v as Self }
                #[inline]
                fn to_f64(self) -> f64 { f64::from(self) }
                #[inline]
                fn from_i32(v: i32) -> Self { v as Self }
            }
        }
    };
}

impl_scalar_float!(f32: sqrt, abs, sin, cos, tan, acos, sinh, cosh, acosh);
impl_scalar_float!(f64: sqrt, abs, sin, cos, tan, acos, sinh, cosh, acosh);
