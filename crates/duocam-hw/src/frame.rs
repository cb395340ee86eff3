//! Raw frame type and pixel-format conversion.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("buffer too short: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// An unprocessed multi-channel buffer returned by a capture read.
///
/// Layout is rows × cols × channels, row-major, interleaved. The channel
/// layout is device-specific and not self-describing: the consumer has to
/// know a priori what each channel means (for the thermal sensor, channel 0
/// is a displayable intensity and channel 1 is an undeciphered scaled
/// value).
#[derive(Clone)]
pub struct RawFrame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub sequence: u32,
}

impl RawFrame {
    /// Wrap a capture buffer, validating its length against the claimed
    /// dimensions. Extra trailing bytes (driver padding) are tolerated.
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u32,
        sequence: u32,
    ) -> Result<Self, FrameError> {
        let expected = (width * height * channels) as usize;
        if data.len() < expected {
            return Err(FrameError::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            sequence,
        })
    }

    /// Sample one channel of one pixel. Panics on out-of-range indices,
    /// which indicates a caller bug rather than bad device data.
    #[inline]
    pub fn sample(&self, row: u32, col: u32, channel: u32) -> u8 {
        debug_assert!(row < self.height && col < self.width && channel < self.channels);
        let idx = ((row * self.width + col) * self.channels + channel) as usize;
        self.data[idx]
    }

    /// Raw interleaved bytes, truncated to exactly rows × cols × channels.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..(self.width * self.height * self.channels) as usize]
    }
}

/// Convert a packed YUYV (4:2:2) frame to interleaved RGB bytes (BT.601).
///
/// YUYV packs two pixels per 4 bytes: [Y0, U, Y1, V]. Both pixels share the
/// chroma pair. The input frame must have 2 channels (2 bytes per pixel).
pub fn yuyv_to_rgb(frame: &RawFrame) -> Result<Vec<u8>, FrameError> {
    let expected = (frame.width * frame.height * 2) as usize;
    let yuyv = frame.bytes();
    if frame.channels != 2 || yuyv.len() < expected {
        return Err(FrameError::InvalidLength {
            expected,
            actual: yuyv.len(),
        });
    }

    let mut rgb = Vec::with_capacity((frame.width * frame.height * 3) as usize);
    for quad in yuyv[..expected].chunks_exact(4) {
        let (y0, u, y1, v) = (quad[0], quad[1], quad[2], quad[3]);
        push_rgb(&mut rgb, y0, u, v);
        push_rgb(&mut rgb, y1, u, v);
    }
    Ok(rgb)
}

#[inline]
fn push_rgb(out: &mut Vec<u8>, y: u8, u: u8, v: u8) {
    // BT.601 limited-range integer conversion.
    let c = y as i32 - 16;
    let d = u as i32 - 128;
    let e = v as i32 - 128;
    let clamp = |x: i32| x.clamp(0, 255) as u8;
    out.push(clamp((298 * c + 409 * e + 128) >> 8));
    out.push(clamp((298 * c - 100 * d - 208 * e + 128) >> 8));
    out.push(clamp((298 * c + 516 * d + 128) >> 8));
}
