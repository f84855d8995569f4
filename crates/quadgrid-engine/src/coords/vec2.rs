use std::ops::{Add, Mul, Sub};

/// 2D vector in normalized device coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Same vector displaced along Y.
    #[inline]
    pub fn offset_y(self, dy: f32) -> Vec2 {
        Vec2::new(self.x, self.y + dy)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_y_keeps_x() {
        let v = Vec2::new(-0.25, 0.25).offset_y(-0.5);
        assert_eq!(v, Vec2::new(-0.25, -0.25));
    }

    #[test]
    fn arithmetic() {
        let a = Vec2::new(0.5, -0.5);
        assert_eq!(a + a, Vec2::new(1.0, -1.0));
        assert_eq!(a - a, Vec2::zero());
        assert_eq!(a * 2.0, Vec2::new(1.0, -1.0));
    }
}