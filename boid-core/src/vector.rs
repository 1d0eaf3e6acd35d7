use core::f32::consts::{FRAC_PI_2, PI, TAU};

pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sinf(angle), libm::cosf(angle))
    }
}

pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

fn rem_euclid(value: f32, modulus: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.rem_euclid(modulus)
    }
    #[cfg(not(feature = "std"))]
    {
        let r = libm::fmodf(value, modulus);
        if r < 0.0 {
            r + modulus
        } else {
            r
        }
    }
}

/// Wraps an angle into `(-π, π]`.
pub fn wrap_signed_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = rem_euclid(angle + PI, TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Wraps an angle into `[0, 2π)`.
pub fn wrap_unsigned_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = rem_euclid(angle, TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// A 2D vector used for positions, directions and steering forces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector for a heading measured counter-clockwise from the up axis.
    ///
    /// A heading of `0` points along `+y`, `π/2` along `-x`.
    pub fn from_heading(heading: f32) -> Self {
        let (sin, cos) = sin_cos(heading);
        Self { x: -sin, y: cos }
    }

    /// Heading (radians from the up axis) this vector points along.
    ///
    /// This is the usual `atan2` angle shifted by 90° because headings are
    /// measured from `+y` rather than `+x`. The result is in `[0, 2π)`.
    pub fn to_heading(&self) -> f32 {
        wrap_unsigned_angle(atan2(self.y, self.x) - FRAC_PI_2)
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.magnitude_squared())
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the unit vector, or the zero vector when the length is zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 && mag.is_finite() {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn dot(&self, other: &Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    /// Rotates counter-clockwise by `angle` radians.
    pub fn rotate(&self, angle: f32) -> Self {
        let (sin, cos) = sin_cos(angle);
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_normalize() {
        let v = Vector2D::new(3.0, 4.0);
        let normalized = v.normalize();
        assert!((normalized.magnitude() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        let normalized = Vector2D::zero().normalize();
        assert_eq!(normalized, Vector2D::zero());
        assert!(normalized.is_finite());
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vector2D::new(4.0, 6.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vector2D::new(2.0, 2.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vector2D::new(2.0, 4.0));

        assert_eq!(-v1, Vector2D::new(-1.0, -2.0));
        assert_eq!(v1.dot(&v2), 11.0);
    }

    #[test]
    fn test_heading_zero_points_up() {
        let forward = Vector2D::from_heading(0.0);
        assert!(approx(forward.x, 0.0));
        assert!(approx(forward.y, 1.0));

        let left = Vector2D::from_heading(FRAC_PI_2);
        assert!(approx(left.x, -1.0));
        assert!(approx(left.y, 0.0));
    }

    #[test]
    fn test_to_heading_inverts_from_heading() {
        for step in 0..16 {
            let heading = step as f32 * TAU / 16.0;
            let back = Vector2D::from_heading(heading).to_heading();
            assert!(
                approx(wrap_signed_angle(back - heading), 0.0),
                "heading {heading} came back as {back}"
            );
        }
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = Vector2D::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(approx(rotated.x, 0.0));
        assert!(approx(rotated.y, 1.0));
    }

    #[test]
    fn test_wrap_angles() {
        assert!(approx(wrap_signed_angle(3.0 * PI / 2.0), -FRAC_PI_2));
        assert!(approx(wrap_signed_angle(-3.0 * PI / 2.0), FRAC_PI_2));
        assert!(approx(wrap_signed_angle(PI), PI));
        assert!(approx(wrap_unsigned_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2));
        assert_eq!(wrap_unsigned_angle(f32::NAN), 0.0);
        let wrapped = wrap_unsigned_angle(-1e-9);
        assert!((0.0..TAU).contains(&wrapped));
    }
}
