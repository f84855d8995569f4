//! 4×4 transform helper.
//!
//! Operations post-multiply onto the current matrix, so `translate` followed by
//! `rotate` yields `T · R`: the quad is rotated in its local frame and then
//! placed at the translated position.

use glam::{Mat4, Vec3};

/// Rotation axis for per-row spins.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Column-major model matrix with a post-multiplying builder API.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    m: Mat4,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self { m: Mat4::IDENTITY }
    }

    /// Resets to identity in place.
    #[inline]
    pub fn set_identity(&mut self) -> &mut Self {
        self.m = Mat4::IDENTITY;
        self
    }

    #[inline]
    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.m *= Mat4::from_translation(Vec3::new(x, y, z));
        self
    }

    /// Rotates by `degrees` around `axis`.
    #[inline]
    pub fn rotate(&mut self, degrees: f32, axis: Axis) -> &mut Self {
        self.m *= Mat4::from_axis_angle(axis.unit(), degrees.to_radians());
        self
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.m == Mat4::IDENTITY
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.m
    }

    /// Column-major floats, ready for a uniform upload.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.m.to_cols_array()
    }

    /// Applies the transform to a point on the z = 0 plane.
    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> Vec3 {
        self.m.transform_point3(Vec3::new(x, y, 0.0))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn translate_moves_origin() {
        let mut t = Transform::identity();
        t.translate(0.25, -0.75, 0.0);
        assert!(close(t.apply(0.0, 0.0), Vec3::new(0.25, -0.75, 0.0)));
    }

    #[test]
    fn rotation_happens_in_local_frame() {
        // T · R: the corner spins around the cell center, not the world origin.
        let mut t = Transform::identity();
        t.translate(0.75, 0.75, 0.0).rotate(90.0, Axis::Z);
        assert!(close(t.apply(0.25, 0.0), Vec3::new(0.75, 1.0, 0.0)));
        assert!(close(t.apply(0.0, 0.0), Vec3::new(0.75, 0.75, 0.0)));
    }

    #[test]
    fn reversed_order_differs() {
        let mut local = Transform::identity();
        local.translate(0.75, 0.0, 0.0).rotate(90.0, Axis::Z);

        let mut world = Transform::identity();
        world.rotate(90.0, Axis::Z).translate(0.75, 0.0, 0.0);

        assert!(!close(local.apply(0.0, 0.0), world.apply(0.0, 0.0)));
    }

    #[test]
    fn y_spin_squashes_width() {
        let mut t = Transform::identity();
        t.rotate(60.0, Axis::Y);
        let p = t.apply(0.25, 0.25);
        assert!((p.x - 0.125).abs() < 1e-5);
        assert!((p.y - 0.25).abs() < 1e-5);
    }

    #[test]
    fn set_identity_discards_history() {
        let mut t = Transform::identity();
        t.translate(1.0, 2.0, 3.0).rotate(45.0, Axis::X);
        t.set_identity();
        assert!(t.is_identity());
    }
}
