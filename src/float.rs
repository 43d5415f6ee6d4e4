//! Scalar type the simulation is generic over.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// The handful of float operations the pendulum and ball field use.
///
/// Implemented for `f32` and `f64`. Transcendentals go through `libm` so a
/// seeded run produces the same numbers on every target, WASM included.
pub trait Float:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    fn zero() -> Self;
    fn one() -> Self;
    fn half() -> Self;
    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn powf(self, exp: Self) -> Self;
    fn abs(self) -> Self;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    /// Arctangent of `y / x` in the correct quadrant; `atan2(0, 0)` is 0.
    fn atan2(y: Self, x: Self) -> Self;

    /// Config values, host measurements and timestamps are all `f64`.
    fn from_f64(v: f64) -> Self;
    /// For logging and the host boundary.
    fn to_f64(self) -> f64;

    /// -1, 0 or 1. Zero stays zero, unlike `f32::signum`.
    fn sign(self) -> Self {
        if self > Self::zero() {
            Self::one()
        } else if self < Self::zero() {
            -Self::one()
        } else {
            Self::zero()
        }
    }
}

macro_rules! impl_float {
    ($t:ty, $sqrt:ident, $sin:ident, $cos:ident, $pow:ident, $fabs:ident, $atan2:ident) => {
        impl Float for $t {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn half() -> Self { 0.5 }
            fn sqrt(self) -> Self { libm::$sqrt(self) }
            fn sin(self) -> Self { libm::$sin(self) }
            fn cos(self) -> Self { libm::$cos(self) }
            fn powf(self, exp: Self) -> Self { libm::$pow(self, exp) }
            fn abs(self) -> Self { libm::$fabs(self) }
            fn min(self, other: Self) -> Self { if other < self { other } else { self } }
            fn max(self, other: Self) -> Self { if other > self { other } else { self } }
            fn atan2(y: Self, x: Self) -> Self { libm::$atan2(y, x) }
            fn from_f64(v: f64) -> Self { v as $t }
            fn to_f64(self) -> f64 { self as f64 }
        }
    };
}

impl_float!(f32, sqrtf, sinf, cosf, powf, fabsf, atan2f);
impl_float!(f64, sqrt, sin, cos, pow, fabs, atan2);
