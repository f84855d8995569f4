//! Paint model shared between the scene planner and renderers.
//!
//! Scope: opaque tints and clear colors. Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
