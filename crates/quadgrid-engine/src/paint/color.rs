/// Opaque-by-default RGBA color.
///
/// Components are display values: the default surface is not sRGB, so `0.4`
/// is shown as `0.4`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Component-wise product, used to apply a tint over a base color.
    #[inline]
    pub fn modulate(self, other: Color) -> Self {
        Self {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a * other.a,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_is_component_wise() {
        let base = Color::rgb(1.0, 0.5, 0.0);
        let tint = Color::rgb(0.5, 0.5, 0.5);
        assert_eq!(base.modulate(tint), Color::rgb(0.5, 0.25, 0.0));
    }

    #[test]
    fn white_is_modulate_identity() {
        let c = Color::rgb(0.85, 0.8, 0.9);
        assert_eq!(c.modulate(Color::WHITE), c);
    }
}
