//! Scene (frame plan) types.
//!
//! Responsibilities:
//! - describe how each cell looks (`appearance`) and moves (`animation`)
//! - own the per-sketch state machine (`GridScene`)
//! - emit renderer-agnostic draw commands in a fixed row-major order

mod animation;
mod appearance;
mod cmd;
mod grid_scene;

pub use animation::{AnimationPolicy, AnimationState, RowMotion, Spin, SwapState};
pub use appearance::{
    Appearance, CellAppearance, NEON_CORNERS, PRIMARY_CORNERS, TintPolicy, WRAP_TABLE, WrapEntry,
    WrapMode,
};
pub use cmd::{DrawCommand, FramePlan};
pub use grid_scene::{GridScene, SceneConfig, SceneState};
