//! GPU rendering subsystem.
//!
//! `GridRenderer` consumes `scene::FramePlan`s and issues GPU commands via wgpu.
//! It owns its GPU resources (pipeline, buffers, textures, samplers).
//!
//! Convention:
//! - CPU geometry is in NDC (origin at the center, +Y up).
//! - Per-cell model matrices arrive through a dynamic-offset uniform buffer.

mod ctx;
mod grid;
mod program;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use grid::GridRenderer;
pub use program::{ProgramSource, build_program};
pub use quad::{ColorVertex, QuadGeometry, QuadSpec, TexVertex, VERTEX_COUNT, VertexAttributes};
