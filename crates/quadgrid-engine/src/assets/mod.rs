//! Image assets.
//!
//! Per-image loads run as futures and are joined by a one-shot barrier that
//! yields the complete, source-ordered list (or the first failure).

mod barrier;
mod loader;

pub use barrier::{BarrierEvent, FailurePolicy, LoadBarrier};
pub use loader::{DecodedImage, LoadOutcome, decode_file, load_all, load_all_blocking};
