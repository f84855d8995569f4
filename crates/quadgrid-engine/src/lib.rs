//! Quadgrid engine crate.
//!
//! Owns the platform + GPU runtime and the grid machinery the sketches are
//! built from: scene planning, image loading, and the grid renderer.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod error;
pub mod coords;
pub mod paint;
pub mod grid;
pub mod transform;
pub mod scene;
pub mod assets;
pub mod render;

pub use error::GridError;
