//! 2D, 3D and 4D vectors with componentwise arithmetic.
//!
//! Addition and subtraction work between vectors of the same dimension;
//! multiplication and division take a scalar on the right. Division by zero
//! follows IEEE-754 and yields infinities or NaN.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 2D vector.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// A 3D vector.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A 4D vector, used for RGBA colors.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a vector with every component set to `scalar`.
    #[must_use]
    pub const fn splat(scalar: f32) -> Self {
        Self::new(scalar, scalar)
    }

    /// Append a `z` component.
    #[must_use]
    pub const fn extend(self, z: f32) -> Vector3 {
        Vector3::new(self.x, self.y, z)
    }
}

impl Vector3 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with every component set to `scalar`.
    #[must_use]
    pub const fn splat(scalar: f32) -> Self {
        Self::new(scalar, scalar, scalar)
    }

    /// The `x` and `y` components.
    #[must_use]
    pub const fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Overwrite `x` and `y`, leaving `z` untouched.
    pub fn set_xy(&mut self, xy: Vector2) {
        self.x = xy.x;
        self.y = xy.y;
    }

    /// Append a `w` component.
    #[must_use]
    pub const fn extend(self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }
}

impl Vector4 {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a vector with every component set to `scalar`.
    #[must_use]
    pub const fn splat(scalar: f32) -> Self {
        Self::new(scalar, scalar, scalar, scalar)
    }

    /// The `x`, `y` and `z` components.
    #[must_use]
    pub const fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

macro_rules! impl_vector_ops {
    ($ty:ident, $glam:ty, $($field:ident),+) => {
        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, scalar: f32) -> Self {
                Self { $($field: self.$field * scalar),+ }
            }
        }

        impl Div<f32> for $ty {
            type Output = Self;
            fn div(self, scalar: f32) -> Self {
                Self { $($field: self.$field / scalar),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $ty {
            fn mul_assign(&mut self, scalar: f32) {
                *self = *self * scalar;
            }
        }

        impl DivAssign<f32> for $ty {
            fn div_assign(&mut self, scalar: f32) {
                *self = *self / scalar;
            }
        }

        impl From<$glam> for $ty {
            fn from(v: $glam) -> Self {
                Self { $($field: v.$field),+ }
            }
        }

        impl From<$ty> for $glam {
            fn from(v: $ty) -> Self {
                <$glam>::new($(v.$field),+)
            }
        }
    };
}

impl_vector_ops!(Vector2, glam::Vec2, x, y);
impl_vector_ops!(Vector3, glam::Vec3, x, y, z);
impl_vector_ops!(Vector4, glam::Vec4, x, y, z, w);

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f32; 5] = [-3.5, -1.0, 0.0, 0.25, 42.0];

    fn vec3_samples() -> Vec<Vector3> {
        let mut out = Vec::new();
        for &x in &SAMPLES {
            for &y in &SAMPLES {
                out.push(Vector3::new(x, y, x - y));
            }
        }
        out
    }

    #[test]
    fn test_add_sub_are_componentwise() {
        for a in vec3_samples() {
            for b in vec3_samples() {
                let sum = a + b;
                assert_eq!(sum.x, a.x + b.x);
                assert_eq!(sum.y, a.y + b.y);
                assert_eq!(sum.z, a.z + b.z);

                let diff = a - b;
                assert_eq!(diff.x, a.x - b.x);
                assert_eq!(diff.y, a.y - b.y);
                assert_eq!(diff.z, a.z - b.z);
            }
        }
    }

    #[test]
    fn test_scalar_mul_div_are_componentwise() {
        for a in vec3_samples() {
            for &s in &[2.0_f32, -0.5, 50.0] {
                let scaled = a * s;
                assert_eq!(scaled, Vector3::new(a.x * s, a.y * s, a.z * s));
                let divided = a / s;
                assert_eq!(divided, Vector3::new(a.x / s, a.y / s, a.z / s));
            }
        }
    }

    #[test]
    fn test_zero_is_additive_identity() {
        for a in vec3_samples() {
            assert_eq!(a + Vector3::ZERO, a);
            assert_eq!(a.xy() + Vector2::ZERO, a.xy());
        }
        let c = Vector4::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c + Vector4::ZERO, c);
    }

    #[test]
    fn test_divide_by_zero_is_not_guarded() {
        let v = Vector2::new(1.0, -1.0) / 0.0;
        assert_eq!(v.x, f32::INFINITY);
        assert_eq!(v.y, f32::NEG_INFINITY);
        assert!((Vector2::ZERO / 0.0).x.is_nan());
    }

    #[test]
    fn test_compound_assignment() {
        let mut v = Vector2::ZERO;
        v.y += 5.0;
        v.x -= 5.0;
        v += Vector2::ONE;
        v *= 2.0;
        v /= 4.0;
        assert_eq!(v, Vector2::new(-2.0, 3.0));
        v -= Vector2::new(1.0, 1.0);
        assert_eq!(-v, Vector2::new(3.0, -2.0));
    }

    #[test]
    fn test_xy_accessors() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.xy(), Vector2::new(1.0, 2.0));
        v.set_xy(Vector2::new(7.0, 8.0));
        assert_eq!(v, Vector3::new(7.0, 8.0, 3.0));
        assert_eq!(Vector2::new(4.0, 5.0).extend(20.0), Vector3::new(4.0, 5.0, 20.0));
        assert_eq!(v.extend(1.0).xyz(), v);
    }

    #[test]
    fn test_glam_conversion() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let g: glam::Vec3 = v.into();
        assert_eq!(g, glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3::from(g * 2.0), v * 2.0);
        assert_eq!(Vector2::from(glam::Vec2::ONE), Vector2::ONE);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Vector2::new(1.5, -2.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
    }
}
