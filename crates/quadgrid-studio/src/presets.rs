//! Sketch presets, one per binary.

use std::path::PathBuf;

use quadgrid_engine::assets::FailurePolicy;
use quadgrid_engine::scene::{
    AnimationPolicy, Appearance, NEON_CORNERS, PRIMARY_CORNERS, SceneConfig, Spin, TintPolicy,
};
use quadgrid_engine::transform::Axis;
use quadgrid_engine::window::RedrawMode;

/// Row images used when none are given on the command line.
pub const DEFAULT_IMAGES: [&str; 4] = [
    "assets/row1.jpg",
    "assets/row2.jpg",
    "assets/row3.jpg",
    "assets/row4.jpg",
];

/// A runnable sketch: window setup plus scene configuration.
#[derive(Debug, Clone)]
pub struct Sketch {
    pub title: &'static str,
    pub scene: SceneConfig,
    pub redraw: RedrawMode,
    /// Bind Up/Down to the iteration level shown in the title.
    pub level_control: bool,
}

/// Four image paths from the command line, or the defaults.
pub fn images_from_args(args: impl IntoIterator<Item = String>) -> Vec<PathBuf> {
    let given: Vec<PathBuf> = args.into_iter().map(PathBuf::from).collect();
    if given.is_empty() {
        DEFAULT_IMAGES.iter().map(PathBuf::from).collect()
    } else {
        if given.len() != DEFAULT_IMAGES.len() {
            log::warn!("expected {} image paths, got {}", DEFAULT_IMAGES.len(), given.len());
        }
        given
    }
}

fn top_spin() -> Spin {
    Spin::new(Axis::Y, 90.0)
}

fn bottom_spin() -> Spin {
    Spin::new(Axis::X, 120.0)
}

pub fn flat_tint() -> Sketch {
    Sketch {
        title: "quadgrid · flat tint",
        scene: SceneConfig {
            appearance: Appearance::FlatTint(TintPolicy::Linear),
            ..SceneConfig::default()
        },
        redraw: RedrawMode::OnDemand,
        level_control: true,
    }
}

pub fn vertex_color() -> Sketch {
    Sketch {
        title: "quadgrid · vertex color",
        scene: SceneConfig {
            appearance: Appearance::VertexColor {
                corners: PRIMARY_CORNERS,
                tint: Some(TintPolicy::Table),
            },
            ..SceneConfig::default()
        },
        redraw: RedrawMode::OnDemand,
        level_control: true,
    }
}

pub fn spin() -> Sketch {
    Sketch {
        title: "quadgrid · spin",
        scene: SceneConfig {
            appearance: Appearance::VertexColor {
                corners: NEON_CORNERS,
                tint: None,
            },
            animation: AnimationPolicy::RotateAxis(Spin::new(Axis::Z, 45.0)),
            ..SceneConfig::default()
        },
        redraw: RedrawMode::Continuous,
        level_control: false,
    }
}

pub fn textured(images: Vec<PathBuf>) -> Sketch {
    Sketch {
        title: "quadgrid · textured",
        scene: SceneConfig {
            appearance: Appearance::Textured { per_column_wrap: false },
            image_sources: images,
            ..SceneConfig::default()
        },
        redraw: RedrawMode::OnDemand,
        level_control: false,
    }
}

pub fn slide_swap(images: Vec<PathBuf>) -> Sketch {
    Sketch {
        title: "quadgrid · slide and swap",
        scene: SceneConfig {
            appearance: Appearance::Textured { per_column_wrap: true },
            animation: AnimationPolicy::SlideAndSwap {
                top: top_spin(),
                bottom: bottom_spin(),
                cycles_per_sec: 0.5,
                distance: 0.5,
            },
            image_sources: images,
            load_policy: FailurePolicy::FailFast,
            ..SceneConfig::default()
        },
        redraw: RedrawMode::Continuous,
        level_control: false,
    }
}

pub fn oscillate(images: Vec<PathBuf>) -> Sketch {
    Sketch {
        title: "quadgrid · oscillate",
        scene: SceneConfig {
            appearance: Appearance::Textured { per_column_wrap: true },
            animation: AnimationPolicy::Oscillate {
                top: top_spin(),
                bottom: bottom_spin(),
                amplitude: 0.25,
                freq_hz: 0.5,
            },
            image_sources: images,
            ..SceneConfig::default()
        },
        redraw: RedrawMode::Continuous,
        level_control: false,
    }
}

#[cfg(test)]
mod tests {
    use quadgrid_engine::scene::{CellAppearance, FramePlan, GridScene, WRAP_TABLE, WrapEntry};

    use super::*;

    fn all() -> Vec<Sketch> {
        let images = images_from_args(Vec::new());
        vec![
            flat_tint(),
            vertex_color(),
            spin(),
            textured(images.clone()),
            slide_swap(images.clone()),
            oscillate(images),
        ]
    }

    #[test]
    fn every_preset_builds_a_scene() {
        for sketch in all() {
            assert!(GridScene::new(sketch.scene).is_ok(), "{}", sketch.title);
        }
    }

    /// First frame after every row texture has arrived.
    fn first_textured_frame(sketch: Sketch) -> FramePlan {
        let mut scene = GridScene::new(sketch.scene).unwrap();
        let count = scene.take_pending_load().map(<[PathBuf]>::len).unwrap();
        assert!(scene.on_textures_ready(count), "{}", sketch.title);
        scene.tick(0.016).unwrap()
    }

    fn wraps(plan: &FramePlan) -> Vec<WrapEntry> {
        plan.draws
            .iter()
            .map(|d| match d.appearance {
                CellAppearance::Texture { wrap, .. } => wrap,
                other => panic!("expected a texture draw, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn animated_textured_presets_vary_wrap_by_column() {
        let images = images_from_args(Vec::new());
        for sketch in [slide_swap(images.clone()), oscillate(images)] {
            let title = sketch.title;
            let plan = first_textured_frame(sketch);
            assert_eq!(plan.draws.len(), 16, "{title}");
            for (draw, wrap) in plan.draws.iter().zip(wraps(&plan)) {
                assert_eq!(wrap, WRAP_TABLE[draw.cell.col], "{title} {:?}", draw.cell);
            }
        }
    }

    #[test]
    fn static_textured_preset_is_clamped() {
        let plan = first_textured_frame(textured(images_from_args(Vec::new())));
        assert!(wraps(&plan).iter().all(|w| *w == WrapEntry::CLAMPED));
    }

    #[test]
    fn animated_presets_redraw_continuously() {
        for sketch in all() {
            let animated = sketch.scene.animation.is_animated();
            assert_eq!(animated, sketch.redraw == RedrawMode::Continuous, "{}", sketch.title);
        }
    }

    #[test]
    fn image_args_override_defaults() {
        let args = ["a.png", "b.png", "c.png", "d.png"].map(String::from);
        let images = images_from_args(args);
        assert_eq!(images[0], PathBuf::from("a.png"));
        assert_eq!(images_from_args(Vec::new())[3], PathBuf::from("assets/row4.jpg"));
    }
}
