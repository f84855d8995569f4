//! Shared quad geometry.
//!
//! One quad is uploaded per renderer and drawn once per grid cell as a
//! 4-vertex triangle strip.

use bytemuck::{Pod, Zeroable};

use crate::error::GridError;
use crate::paint::Color;

/// Vertices per quad draw.
pub const VERTEX_COUNT: u32 = 4;

/// Texture coordinates in strip order (TL, BL, TR, BR).
const STRIP_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [0.0, 0.0], [1.0, 1.0], [1.0, 0.0]];

// ── vertex formats ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub pos: [f32; 2],
    pub rgb: [f32; 3],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x3  // rgb
    ];
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl TexVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];
}

// ── quad spec ─────────────────────────────────────────────────────────────

/// Per-vertex attribute kind carried alongside positions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VertexAttributes {
    /// One color per corner, in strip order (TL, BL, TR, BR).
    Colors([Color; 4]),
    TexCoords,
}

/// Input to quad creation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadSpec {
    pub half_extent: f32,
    pub attributes: VertexAttributes,
}

impl QuadSpec {
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(GridError::fatal(format!(
                "quad half-extent must be finite and positive, got {}",
                self.half_extent
            )));
        }
        if let VertexAttributes::Colors(corners) = &self.attributes {
            if corners.iter().any(|c| !c.is_finite()) {
                return Err(GridError::fatal("quad corner colors must be finite"));
            }
        }
        Ok(())
    }

    /// Builds CPU-side vertex data.
    pub fn build(&self) -> Result<QuadGeometry, GridError> {
        self.validate()?;

        let h = self.half_extent;
        let positions = [[-h, h], [-h, -h], [h, h], [h, -h]];

        Ok(match self.attributes {
            VertexAttributes::Colors(corners) => {
                let mut verts = [ColorVertex::zeroed(); 4];
                for (v, (pos, c)) in verts.iter_mut().zip(positions.iter().zip(corners)) {
                    *v = ColorVertex { pos: *pos, rgb: [c.r, c.g, c.b] };
                }
                QuadGeometry::Colored(verts)
            }
            VertexAttributes::TexCoords => {
                let mut verts = [TexVertex::zeroed(); 4];
                for (v, (pos, uv)) in verts.iter_mut().zip(positions.iter().zip(STRIP_UVS)) {
                    *v = TexVertex { pos: *pos, uv };
                }
                QuadGeometry::Textured(verts)
            }
        })
    }
}

// ── geometry ──────────────────────────────────────────────────────────────

/// Strip-ordered vertex data for one quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum QuadGeometry {
    Colored([ColorVertex; 4]),
    Textured([TexVertex; 4]),
}

impl QuadGeometry {
    #[inline]
    pub fn is_textured(&self) -> bool {
        matches!(self, QuadGeometry::Textured(_))
    }

    pub fn positions(&self) -> [[f32; 2]; 4] {
        match self {
            QuadGeometry::Colored(v) => v.map(|v| v.pos),
            QuadGeometry::Textured(v) => v.map(|v| v.pos),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            QuadGeometry::Colored(v) => bytemuck::cast_slice(v),
            QuadGeometry::Textured(v) => bytemuck::cast_slice(v),
        }
    }

    pub fn layout(&self) -> wgpu::VertexBufferLayout<'static> {
        match self {
            QuadGeometry::Colored(_) => wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ColorVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &ColorVertex::ATTRS,
            },
            QuadGeometry::Textured(_) => wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<TexVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &TexVertex::ATTRS,
            },
        }
    }
}
