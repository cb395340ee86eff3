//! Dual-plane frame decoding.
//!
//! The thermal sensor emits frames whose row dimension is twice the logical
//! sensor height: the top half and bottom half carry two sub-images, and
//! each pixel carries two channels. Channel 0 is a displayable grayscale
//! intensity; channel 1 is an opaque scaled value the vendor has not
//! documented — it is NOT validated temperature data and nothing here
//! interprets it beyond passing the bytes along.

use duocam_hw::RawFrame;
use image::{GrayImage, Luma};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("dual-plane frame needs at least 2 channels, got {got}")]
    TooFewChannels { got: u32 },
    #[error("dual-plane frame needs at least 2 rows, got {got}")]
    TooFewRows { got: u32 },
}

/// The four planes a dual-plane frame decomposes into.
///
/// All four have the same (H, W) shape, where H is half the raw frame's row
/// count. By device convention only `top_visible` and `bottom_raw` carry
/// meaningful data; the other two are decoding artifacts kept for
/// diagnostics.
pub struct DecodedPlanes {
    pub top_visible: GrayImage,
    pub top_raw: GrayImage,
    pub bottom_visible: GrayImage,
    pub bottom_raw: GrayImage,
}

impl DecodedPlanes {
    /// The displayable visible-light plane.
    pub fn visible(&self) -> &GrayImage {
        &self.top_visible
    }

    /// The raw-thermal plane: an opaque scaled 8-bit quantity, pending
    /// future decoding.
    pub fn thermal_raw(&self) -> &GrayImage {
        &self.bottom_raw
    }
}

/// Split a (2H × W × C) raw frame into four (H, W) grayscale planes.
///
/// Rows `0..H` feed the top planes and rows `H..2H` the bottom planes;
/// within each half, channel 0 feeds the visible plane and channel 1 the
/// raw plane. H is the raw row count divided by two rounding down: an odd
/// row count drops its final row so all four planes share one exact shape.
pub fn split_dual_plane(frame: &RawFrame) -> Result<DecodedPlanes, DecodeError> {
    if frame.channels < 2 {
        return Err(DecodeError::TooFewChannels {
            got: frame.channels,
        });
    }
    if frame.height < 2 {
        return Err(DecodeError::TooFewRows { got: frame.height });
    }

    let w = frame.width;
    let h = frame.height / 2;
    if frame.height % 2 != 0 {
        tracing::debug!(rows = frame.height, "odd row count, dropping final row");
    }

    let plane = |row_base: u32, channel: u32| {
        GrayImage::from_fn(w, h, |x, y| Luma([frame.sample(row_base + y, x, channel)]))
    };

    Ok(DecodedPlanes {
        top_visible: plane(0, 0),
        top_raw: plane(0, 1),
        bottom_visible: plane(h, 0),
        bottom_raw: plane(h, 1),
    })
}
