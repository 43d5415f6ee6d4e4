//! Planar vectors in screen space.

use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::float::Float;

/// Operations shared by the simulation's vector types.
pub trait Vec: Copy + Add<Output = Self> + Sub<Output = Self> + PartialEq + Default + core::fmt::Debug {
    type Scalar: Float;

    fn zero() -> Self;

    fn dot(self, other: Self) -> Self::Scalar;

    fn scale(self, s: Self::Scalar) -> Self;

    fn length(self) -> Self::Scalar {
        self.dot(self).sqrt()
    }

    fn distance(self, other: Self) -> Self::Scalar {
        (self - other).length()
    }
}

/// x grows to the right, y grows downward, in px.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    pub fn new(x: F, y: F) -> Self {
        Vec2 { x, y }
    }

    /// `|x| + |y|`. Used for lanyard tension and ball deformation.
    pub fn manhattan(self) -> F {
        self.x.abs() + self.y.abs()
    }
}

macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<F: Float> $trait for Vec2<F> {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self {
                Vec2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);

impl<F: Float> Vec for Vec2<F> {
    type Scalar = F;

    fn zero() -> Self {
        Vec2::new(F::zero(), F::zero())
    }

    fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    fn scale(self, s: F) -> Self {
        Vec2::new(self.x * s, self.y * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_distance() {
        let a = Vec2::new(1.0f32, 1.0);
        let b = Vec2::new(4.0f32, 5.0);
        assert!(((b - a).length() - 5.0).abs() < 1e-6);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn manhattan_ignores_sign() {
        assert_eq!(Vec2::new(-3.0f32, 4.0).manhattan(), 7.0);
    }

    #[test]
    fn scale_is_componentwise() {
        assert_eq!(Vec2::new(2.0f64, -1.0).scale(0.5), Vec2::new(1.0, -0.5));
    }
}
