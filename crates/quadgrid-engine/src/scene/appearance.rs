use crate::grid::{GRID_DIM, GridCell};
use crate::paint::Color;

// ── wrap modes ────────────────────────────────────────────────────────────

/// Sampling policy outside the `[0, 1]` UV range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WrapMode {
    Clamp,
    Repeat,
    MirrorRepeat,
}

impl WrapMode {
    #[inline]
    pub fn to_wgpu(self) -> wgpu::AddressMode {
        match self {
            WrapMode::Clamp => wgpu::AddressMode::ClampToEdge,
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
            WrapMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }
}

/// Wrap modes plus the UV ("ST") scale that makes them visible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WrapEntry {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub scale_s: f32,
    pub scale_t: f32,
}

impl WrapEntry {
    pub const CLAMPED: WrapEntry = WrapEntry::new(WrapMode::Clamp, WrapMode::Clamp, 1.0, 1.0);

    pub const fn new(wrap_s: WrapMode, wrap_t: WrapMode, scale_s: f32, scale_t: f32) -> Self {
        Self { wrap_s, wrap_t, scale_s, scale_t }
    }

    #[inline]
    pub fn uv_scale(self) -> [f32; 2] {
        [self.scale_s, self.scale_t]
    }

    /// Key identifying the sampler this entry needs.
    #[inline]
    pub fn sampler_key(self) -> (WrapMode, WrapMode) {
        (self.wrap_s, self.wrap_t)
    }
}

/// Per-column wrap/scale combinations, indexed by column.
pub const WRAP_TABLE: [WrapEntry; GRID_DIM] = [
    WrapEntry::new(WrapMode::Clamp, WrapMode::Clamp, 1.0, 1.0),
    WrapEntry::new(WrapMode::Repeat, WrapMode::Clamp, 2.0, 1.0),
    WrapEntry::new(WrapMode::Clamp, WrapMode::MirrorRepeat, 1.0, 2.0),
    WrapEntry::new(WrapMode::Repeat, WrapMode::MirrorRepeat, 2.0, 2.0),
];

// ── tints ─────────────────────────────────────────────────────────────────

const TABLE_ROW_R: [f32; 4] = [0.85, 0.70, 0.95, 0.75];
const TABLE_COL_G: [f32; 4] = [0.80, 0.95, 0.70, 0.90];
const TABLE_MIX_B: [f32; 4] = [0.90, 0.75, 0.85, 0.65];

/// Deterministic per-cell tint functions.
///
/// Red follows the row, green the column, blue the diagonal `(row + col) mod 4`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TintPolicy {
    /// Small linear steps; every component stays in `[0.4, 1.0]`.
    Linear,
    /// Fixed lookup tables.
    Table,
}

impl TintPolicy {
    pub fn tint(self, cell: GridCell) -> Color {
        let GridCell { row, col } = cell;
        let diag = (row + col) % GRID_DIM;
        match self {
            TintPolicy::Linear => Color::rgb(
                0.4 + 0.15 * (row + 1) as f32,
                0.4 + 0.10 * (col + 1) as f32,
                0.4 + 0.05 * (diag + 1) as f32,
            ),
            TintPolicy::Table => Color::rgb(TABLE_ROW_R[row], TABLE_COL_G[col], TABLE_MIX_B[diag]),
        }
    }
}

// ── appearance policy ─────────────────────────────────────────────────────

/// Corner colors: red, green, blue, yellow (TL, BL, TR, BR).
pub const PRIMARY_CORNERS: [Color; 4] = [
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(0.0, 1.0, 0.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(1.0, 1.0, 0.0),
];

/// Corner colors: magenta, cyan, orange, violet (TL, BL, TR, BR).
pub const NEON_CORNERS: [Color; 4] = [
    Color::rgb(1.0, 0.0, 1.0),
    Color::rgb(0.0, 1.0, 1.0),
    Color::rgb(1.0, 0.5, 0.0),
    Color::rgb(0.6, 0.0, 1.0),
];

/// How each grid cell is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// White quad multiplied by a per-cell tint.
    FlatTint(TintPolicy),

    /// Per-vertex colors baked into the quad, optionally multiplied by a tint.
    VertexColor {
        corners: [Color; 4],
        tint: Option<TintPolicy>,
    },

    /// One texture per row, shared by every column of that row.
    Textured { per_column_wrap: bool },
}

/// Resolved appearance for one draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CellAppearance {
    Tint(Color),
    Texture { slot: usize, wrap: WrapEntry },
}

impl CellAppearance {
    /// UV scale uniform for this draw.
    #[inline]
    pub fn uv_scale(self) -> [f32; 2] {
        match self {
            CellAppearance::Tint(_) => [1.0, 1.0],
            CellAppearance::Texture { wrap, .. } => wrap.uv_scale(),
        }
    }
}

impl Appearance {
    #[inline]
    pub fn uses_textures(&self) -> bool {
        matches!(self, Appearance::Textured { .. })
    }

    /// Colors baked into the quad's vertices, or `None` for textured quads.
    pub fn corner_colors(&self) -> Option<[Color; 4]> {
        match self {
            Appearance::FlatTint(_) => Some([Color::WHITE; 4]),
            Appearance::VertexColor { corners, .. } => Some(*corners),
            Appearance::Textured { .. } => None,
        }
    }

    /// Appearance of `cell` given the current row → texture slot mapping.
    pub fn cell(&self, cell: GridCell, row_slots: &[usize; GRID_DIM]) -> CellAppearance {
        match self {
            Appearance::FlatTint(policy) => CellAppearance::Tint(policy.tint(cell)),
            Appearance::VertexColor { tint, .. } => {
                CellAppearance::Tint(tint.map_or(Color::WHITE, |p| p.tint(cell)))
            }
            Appearance::Textured { per_column_wrap } => CellAppearance::Texture {
                slot: row_slots[cell.row],
                wrap: if *per_column_wrap { WRAP_TABLE[cell.col] } else { WrapEntry::CLAMPED },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::cells;

    const IDENTITY_SLOTS: [usize; 4] = [0, 1, 2, 3];

    // ── wrap table ────────────────────────────────────────────────────────

    #[test]
    fn wrap_table_matches_columns() {
        use WrapMode::*;
        let expected = [
            (Clamp, Clamp, 1.0, 1.0),
            (Repeat, Clamp, 2.0, 1.0),
            (Clamp, MirrorRepeat, 1.0, 2.0),
            (Repeat, MirrorRepeat, 2.0, 2.0),
        ];
        for (col, e) in expected.iter().enumerate() {
            let w = WRAP_TABLE[col];
            assert_eq!((w.wrap_s, w.wrap_t, w.scale_s, w.scale_t), *e, "column {col}");
        }
    }

    #[test]
    fn per_column_wrap_follows_table() {
        let a = Appearance::Textured { per_column_wrap: true };
        for cell in cells() {
            let CellAppearance::Texture { wrap, .. } = a.cell(cell, &IDENTITY_SLOTS) else {
                panic!("textured appearance produced a tint");
            };
            assert_eq!(wrap, WRAP_TABLE[cell.col]);
        }
    }

    #[test]
    fn uniform_wrap_is_clamped() {
        let a = Appearance::Textured { per_column_wrap: false };
        let c = a.cell(GridCell::new(2, 3), &IDENTITY_SLOTS);
        assert_eq!(c, CellAppearance::Texture { slot: 2, wrap: WrapEntry::CLAMPED });
        assert_eq!(c.uv_scale(), [1.0, 1.0]);
    }

    // ── textures ──────────────────────────────────────────────────────────

    #[test]
    fn texture_is_shared_across_a_row() {
        let a = Appearance::Textured { per_column_wrap: true };
        let slots = [0, 2, 1, 3];
        for cell in cells() {
            let CellAppearance::Texture { slot, .. } = a.cell(cell, &slots) else {
                panic!("expected texture");
            };
            assert_eq!(slot, slots[cell.row]);
        }
    }

    // ── tints ─────────────────────────────────────────────────────────────

    #[test]
    fn linear_tint_stays_visible() {
        for cell in cells() {
            let c = TintPolicy::Linear.tint(cell);
            for v in [c.r, c.g, c.b] {
                assert!(v >= 0.4 - 1e-6 && v <= 1.0 + 1e-6, "{cell:?} -> {c:?}");
            }
        }
    }

    #[test]
    fn linear_tint_known_values() {
        let c = TintPolicy::Linear.tint(GridCell::new(3, 3));
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 0.8).abs() < 1e-6);
        // (3 + 3) mod 4 = 2
        assert!((c.b - 0.55).abs() < 1e-6);
    }

    #[test]
    fn table_tint_uses_diagonal_for_blue() {
        let c = TintPolicy::Table.tint(GridCell::new(1, 2));
        assert_eq!(c, Color::rgb(0.70, 0.70, 0.65));
    }

    #[test]
    fn vertex_color_without_tint_is_white() {
        let a = Appearance::VertexColor { corners: PRIMARY_CORNERS, tint: None };
        assert_eq!(a.cell(GridCell::new(0, 0), &IDENTITY_SLOTS), CellAppearance::Tint(Color::WHITE));
        assert_eq!(a.corner_colors(), Some(PRIMARY_CORNERS));
    }

    #[test]
    fn flat_tint_quad_is_white() {
        let a = Appearance::FlatTint(TintPolicy::Table);
        assert_eq!(a.corner_colors(), Some([Color::WHITE; 4]));
        assert!(!a.uses_textures());
    }
}
