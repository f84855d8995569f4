use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use image::ImageError;
use image::error::{ParameterError, ParameterErrorKind};

use crate::error::GridError;

use super::barrier::{BarrierEvent, FailurePolicy, LoadBarrier};

/// RGBA8 pixels ready for upload.
///
/// Rows are stored bottom row first so that texture coordinate `v = 1`
/// samples the top of the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

/// Final state of a batch load.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Every image decoded; one entry per source, in source order.
    Ready(Vec<DecodedImage>),
    /// The first failure under [`FailurePolicy::FailFast`].
    Failed(GridError),
    /// A load failed under [`FailurePolicy::Stall`]; the images will never arrive.
    Stalled,
}

/// Decodes one file into flipped RGBA8.
pub fn decode_file(path: &Path) -> Result<DecodedImage, ImageError> {
    let mut rgba = image::open(path)?.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )));
    }
    image::imageops::flip_vertical_in_place(&mut rgba);

    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

async fn load_one(index: usize, path: PathBuf) -> (usize, Result<DecodedImage, GridError>) {
    let result = decode_file(&path).map_err(|reason| GridError::LoadFailure {
        index,
        path: path.clone(),
        reason,
    });
    if result.is_ok() {
        log::debug!("decoded image #{index} from {}", path.display());
    }
    (index, result)
}

/// Loads every source and joins the results through a [`LoadBarrier`].
///
/// Decoding is synchronous, so under a single-threaded executor the files are
/// decoded one after another in source order. Completion order is still
/// treated as arbitrary.
pub async fn load_all(sources: &[PathBuf], policy: FailurePolicy) -> LoadOutcome {
    if sources.is_empty() {
        return LoadOutcome::Ready(Vec::new());
    }

    let mut barrier = LoadBarrier::new(sources.len(), policy);
    let mut pending: FuturesUnordered<_> = sources
        .iter()
        .enumerate()
        .map(|(i, p)| load_one(i, p.clone()))
        .collect();

    while let Some((index, result)) = pending.next().await {
        match barrier.complete(index, result) {
            BarrierEvent::Ready(images) => {
                log::info!("all {} images loaded", images.len());
                return LoadOutcome::Ready(images);
            }
            BarrierEvent::Failed(e) => return LoadOutcome::Failed(e),
            BarrierEvent::Waiting | BarrierEvent::Stalled | BarrierEvent::Ignored => {}
        }
    }

    log::warn!("image barrier stalled; the grid will not render");
    LoadOutcome::Stalled
}

/// Blocking wrapper over [`load_all`] for the render thread.
pub fn load_all_blocking(sources: &[PathBuf], policy: FailurePolicy) -> LoadOutcome {
    pollster::block_on(load_all(sources, policy))
}
