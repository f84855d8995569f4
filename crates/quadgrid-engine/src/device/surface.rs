use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks a format whose sRGB-ness matches `prefer_srgb`, else the surface's first format.
///
/// With a non-sRGB target, shader outputs reach the display unencoded.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = formats.first().copied()?;

    let preferred = if prefer_srgb {
        [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]
    } else {
        [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
    };
    if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
        return Some(f);
    }
    if let Some(f) = formats.iter().copied().find(|f| f.is_srgb() == prefer_srgb) {
        return Some(f);
    }

    log::warn!("no surface format with srgb={prefer_srgb} offered; using {first:?}");
    Some(first)
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Applies a new drawable size. A zero-area size is recorded but not configured.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            log::debug!("surface {err:?}; reconfiguring");
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => {
            log::error!("surface out of memory");
            SurfaceErrorAction::Fatal
        }
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use wgpu::{CompositeAlphaMode as Alpha, TextureFormat as Fmt};

    use super::*;

    // ── surface format ────────────────────────────────────────────────────

    #[test]
    fn prefers_bgra_srgb() {
        let formats = [Fmt::Rgba8Unorm, Fmt::Rgba8UnormSrgb, Fmt::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Bgra8UnormSrgb));
    }

    #[test]
    fn prefers_plain_unorm_when_srgb_is_off() {
        let formats = [Fmt::Bgra8UnormSrgb, Fmt::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8Unorm));

        let formats = [Fmt::Rgba8UnormSrgb, Fmt::Rgba16Float];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Rgba16Float));
    }

    #[test]
    fn default_surface_shows_colors_unencoded() {
        let prefer_srgb = crate::device::GpuInit::default().prefer_srgb;
        let formats = [Fmt::Bgra8Unorm, Fmt::Bgra8UnormSrgb];
        let chosen = choose_surface_format(&formats, prefer_srgb);
        assert_eq!(chosen.map(|f| f.is_srgb()), Some(false));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [Fmt::Bgra8Unorm, Fmt::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Bgra8Unorm));

        let formats = [Fmt::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8UnormSrgb));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha mode ────────────────────────────────────────────────────────

    #[test]
    fn unsupported_alpha_request_is_replaced() {
        let modes = [Alpha::Opaque, Alpha::PreMultiplied];
        assert_eq!(choose_alpha_mode(&modes, Some(Alpha::PreMultiplied)), Alpha::PreMultiplied);
        assert_eq!(choose_alpha_mode(&modes, Some(Alpha::PostMultiplied)), Alpha::Opaque);
        assert_eq!(choose_alpha_mode(&[], None), Alpha::Auto);
    }
}
