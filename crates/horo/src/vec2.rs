use crate::Scalar;

/// Two-component vector: texture coordinates and mouse deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<S> {
    pub x: S,
    pub y: S,
}

impl<S: Scalar> Vec2<S> {
    #[inline]
    pub fn new(x: S, y: S) -> Self { Self { x, y } }

    #[inline]
    pub fn zero() -> Self { Self::new(S::ZERO, S::ZERO) }

    /// Point on the unit circle, mapped into the `[0, 1]²` texture square.
    #[inline]
    pub fn on_unit_disc(angle: S) -> Self {
        Self::new(S::HALF + S::HALF * angle.cos(), S::HALF + S::HALF * angle.sin())
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> S { self.x * rhs.x + self.y * rhs.y }

    #[inline]
    pub fn norm(self) -> S { self.dot(self).sqrt() }

    #[inline]
    pub fn to_f32_array(self) -> [f32; 2] {
        [self.x.to_f64() as f32, self.y.to_f64() as f32]
    }
}

fieldwise_ops!(Vec2 { x, y });
