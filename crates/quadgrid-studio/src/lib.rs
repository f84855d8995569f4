//! Grid sketches.
//!
//! Each binary picks a preset from [`presets`] and hands it to [`run`].

pub mod level;
pub mod presets;

use anyhow::Result;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use quadgrid_engine::assets::{LoadOutcome, load_all_blocking};
use quadgrid_engine::core::{App, AppControl, FrameCtx, StopHandle, WindowCtx};
use quadgrid_engine::device::GpuInit;
use quadgrid_engine::logging::{LoggingConfig, init_logging};
use quadgrid_engine::render::{GridRenderer, QuadSpec, VertexAttributes};
use quadgrid_engine::scene::{GridScene, SceneState};
use quadgrid_engine::window::{Runtime, RuntimeConfig};

use level::IterationLevel;
use presets::Sketch;

/// Initializes logging and runs `sketch` until its window closes.
pub fn run(sketch: Sketch) -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: sketch.title.to_string(),
        initial_size: LogicalSize::new(640.0, 640.0),
        redraw: sketch.redraw,
    };
    let app = SketchApp::new(sketch)?;

    Runtime::run(config, GpuInit::default(), app)
}

/// Implements `quadgrid_engine::core::App` for one sketch.
///
/// The renderer is created on the first frame, once a device exists. Texture
/// loading runs on that same frame, so the first plan already reflects the
/// barrier's outcome.
struct SketchApp {
    title: &'static str,
    scene: GridScene,
    renderer: Option<GridRenderer>,
    level: Option<IterationLevel>,
    stop: StopHandle,
    first_frame_logged: bool,
}

impl SketchApp {
    fn new(sketch: Sketch) -> Result<Self> {
        let scene = GridScene::new(sketch.scene)?;
        let stop = scene.stop_handle();
        log::info!("starting sketch `{}` in {:?}", sketch.title, scene.state());

        Ok(Self {
            title: sketch.title,
            scene,
            renderer: None,
            level: sketch.level_control.then(IterationLevel::default),
            stop,
            first_frame_logged: false,
        })
    }

    fn quad_spec(&self) -> QuadSpec {
        let config = self.scene.config();
        let attributes = match config.appearance.corner_colors() {
            Some(corners) => VertexAttributes::Colors(corners),
            None => VertexAttributes::TexCoords,
        };
        QuadSpec { half_extent: config.half_extent, attributes }
    }

    /// Creates the renderer and resolves the image barrier. `false` is fatal.
    fn ensure_renderer(&mut self, ctx: &FrameCtx<'_, '_>) -> bool {
        if self.renderer.is_some() {
            return true;
        }

        let rctx = ctx.render_ctx();
        let mut renderer = match GridRenderer::initialize(&rctx, &self.quad_spec()) {
            Ok(r) => r,
            Err(e) => {
                log::error!("{e}");
                return false;
            }
        };

        if let Some(sources) = self.scene.take_pending_load() {
            let sources = sources.to_vec();
            let policy = self.scene.config().load_policy;
            log::info!("loading {} row images", sources.len());

            match load_all_blocking(&sources, policy) {
                LoadOutcome::Ready(images) => match renderer.upload_textures(&rctx, &images) {
                    Ok(()) => {
                        self.scene.on_textures_ready(images.len());
                    }
                    Err(e) => self.scene.on_textures_failed(&e),
                },
                LoadOutcome::Failed(e) => self.scene.on_textures_failed(&e),
                LoadOutcome::Stalled => {}
            }
        }

        self.renderer = Some(renderer);
        true
    }

    fn on_key(&mut self, window: &WindowCtx<'_>, code: KeyCode) {
        if code == KeyCode::Escape {
            log::info!("escape pressed; stopping");
            self.stop.stop();
            window.request_redraw();
            return;
        }

        let Some(level) = self.level.as_mut() else { return };
        let changed = match code {
            KeyCode::ArrowUp => level.increment(),
            KeyCode::ArrowDown => level.decrement(),
            _ => false,
        };
        if changed {
            log::debug!("iteration level -> {}", level.get());
            window.set_title(&level.title(self.title));
            window.request_redraw();
        }
    }
}

impl App for SketchApp {
    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.on_key(window, code);
                }
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.ensure_renderer(ctx) {
            return AppControl::Exit;
        }

        let Some(plan) = self.scene.tick(ctx.time.dt) else {
            return AppControl::Exit;
        };

        if !self.first_frame_logged && self.scene.state() != SceneState::Idle {
            log::debug!("first {:?} frame: {} draws", self.scene.state(), plan.draws.len());
            self.first_frame_logged = true;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Exit;
        };
        ctx.render(plan.clear, |rctx, target| {
            renderer.render_frame(rctx, target, &plan);
        })
    }
}
