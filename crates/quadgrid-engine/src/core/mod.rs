//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the sketches built on it, plus the per-frame context handed to them.

mod app;
mod ctx;
mod stop;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use stop::StopHandle;
