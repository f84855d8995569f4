//! Coordinate types.
//!
//! Grid geometry lives directly in normalized device coordinates:
//! - `[-1, 1]` on both axes
//! - origin at the surface center
//! - +X right, +Y up
//!
//! No viewport conversion is applied by the renderers.

mod vec2;

pub use vec2::Vec2;
