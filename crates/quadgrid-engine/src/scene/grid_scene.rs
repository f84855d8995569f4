use std::path::PathBuf;

use crate::assets::FailurePolicy;
use crate::core::StopHandle;
use crate::error::GridError;
use crate::grid::{GRID_DIM, GridCell, cells};
use crate::paint::Color;
use crate::transform::Transform;

use super::animation::{AnimationPolicy, AnimationState};
use super::appearance::Appearance;
use super::cmd::{DrawCommand, FramePlan};

/// Static description of a grid sketch.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Half the side length of the quad, in NDC.
    pub half_extent: f32,
    pub appearance: Appearance,
    pub animation: AnimationPolicy,
    /// Image files, one per row, top row first.
    pub image_sources: Vec<PathBuf>,
    pub load_policy: FailurePolicy,
    pub clear: Color,
    /// Clear color shown once image loading has failed.
    pub error_clear: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            half_extent: 0.25,
            appearance: Appearance::FlatTint(super::appearance::TintPolicy::Linear),
            animation: AnimationPolicy::Static,
            image_sources: Vec::new(),
            load_policy: FailurePolicy::FailFast,
            clear: Color::BLACK,
            error_clear: Color::rgb(0.35, 0.0, 0.0),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(GridError::fatal(format!(
                "quad half-extent must be positive, got {}",
                self.half_extent
            )));
        }
        if self.appearance.uses_textures() && self.image_sources.len() < GRID_DIM {
            return Err(GridError::fatal(format!(
                "textured grid needs {GRID_DIM} images, got {}",
                self.image_sources.len()
            )));
        }
        Ok(())
    }
}

/// Lifecycle of a scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneState {
    /// Waiting for textures; nothing is drawn.
    Idle,
    /// Drawing every tick.
    Running,
    /// Textures failed to load; only the error clear color is shown.
    Failed,
}

/// Owns everything the grid loop mutates between frames.
///
/// `tick` is a pure step from elapsed time to a [`FramePlan`]; the host decides
/// when to call it and hands the plan to a renderer.
#[derive(Debug)]
pub struct GridScene {
    config: SceneConfig,
    state: SceneState,
    animation: AnimationState,
    load_requested: bool,
    stop: StopHandle,
}

impl GridScene {
    pub fn new(config: SceneConfig) -> Result<Self, GridError> {
        config.validate()?;

        let state = if config.appearance.uses_textures() {
            SceneState::Idle
        } else {
            SceneState::Running
        };

        Ok(Self {
            config,
            state,
            animation: AnimationState::new(),
            load_requested: false,
            stop: StopHandle::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> SceneState {
        self.state
    }

    #[inline]
    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Handle that ends the loop at the next tick.
    #[inline]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Image sources to load, returned once while the scene is idle.
    pub fn take_pending_load(&mut self) -> Option<&[PathBuf]> {
        if self.state != SceneState::Idle || self.load_requested {
            return None;
        }
        self.load_requested = true;
        Some(&self.config.image_sources)
    }

    /// Barrier fired with `count` textures. Transitions `Idle → Running` once.
    pub fn on_textures_ready(&mut self, count: usize) -> bool {
        if self.state != SceneState::Idle {
            log::debug!("textures ready while {:?}; ignored", self.state);
            return false;
        }
        if count < GRID_DIM {
            log::error!("expected {GRID_DIM} textures, got {count}");
            self.state = SceneState::Failed;
            return false;
        }
        log::info!("textures ready; grid running");
        self.state = SceneState::Running;
        true
    }

    /// Barrier failed. Leaves the scene permanently in `Failed`.
    pub fn on_textures_failed(&mut self, err: &GridError) {
        if self.state == SceneState::Idle {
            log::error!("grid will not render: {err}");
            self.state = SceneState::Failed;
        }
    }

    /// Advances animation by `dt` seconds and plans the frame.
    ///
    /// Returns `None` once the stop flag is set.
    pub fn tick(&mut self, dt: f32) -> Option<FramePlan> {
        if self.stop.is_stopped() {
            return None;
        }
        if self.state == SceneState::Running {
            let wraps = self.animation.advance(dt, &self.config.animation);
            if wraps > 0 && self.config.animation.swaps_rows() {
                log::debug!("row swap -> {:?}", self.animation.swap().slots());
            }
        }
        Some(self.plan())
    }

    /// Plans the current frame without advancing time.
    pub fn plan(&self) -> FramePlan {
        match self.state {
            SceneState::Idle => FramePlan::clear_only(self.config.clear),
            SceneState::Failed => FramePlan::clear_only(self.config.error_clear),
            SceneState::Running => {
                let mut scratch = Transform::identity();
                let draws = cells().map(|cell| self.plan_cell(cell, &mut scratch)).collect();
                FramePlan { clear: self.config.clear, draws }
            }
        }
    }

    /// Plans one cell. `scratch` is reset before use, so nothing carries over
    /// from the previous cell.
    pub fn plan_cell(&self, cell: GridCell, scratch: &mut Transform) -> DrawCommand {
        scratch.set_identity();

        let motion = self.config.animation.row_motion(cell.row, &self.animation);
        let center = cell.center().offset_y(motion.offset_y);
        debug_assert!(center.is_finite(), "{cell:?} center {center:?}");

        scratch.translate(center.x, center.y, 0.0);
        if let Some((degrees, axis)) = motion.rotation {
            scratch.rotate(degrees, axis);
        }

        let row_slots = self.animation.row_slots();
        DrawCommand {
            cell,
            center,
            transform: *scratch,
            appearance: self.config.appearance.cell(cell, &row_slots),
        }
    }
}
