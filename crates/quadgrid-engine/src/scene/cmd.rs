use crate::coords::Vec2;
use crate::grid::GridCell;
use crate::paint::Color;
use crate::transform::Transform;

use super::appearance::CellAppearance;

/// One quad draw: the uniforms a renderer sets before issuing a 4-vertex strip.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand {
    pub cell: GridCell,
    /// Placement of the quad center, including any per-row slide.
    pub center: Vec2,
    pub transform: Transform,
    pub appearance: CellAppearance,
}

/// Everything a renderer needs for one frame, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub clear: Color,
    pub draws: Vec<DrawCommand>,
}

impl FramePlan {
    /// A frame that only clears the surface.
    #[inline]
    pub fn clear_only(clear: Color) -> Self {
        Self { clear, draws: Vec::new() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}
