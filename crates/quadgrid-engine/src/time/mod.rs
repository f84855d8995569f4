//! Time subsystem.
//!
//! One `FrameClock` per sketch window; `tick()` once per presented frame
//! yields the `dt` that drives scene animation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
