//! Centered sub-region extraction.
//!
//! Used to optically align the wide-field visible camera with the
//! narrower-field thermal sensor: a crop of the visible frame, centered on
//! the image midpoint plus a per-rig offset, approximates the thermal
//! field of view.

use image::imageops;
use image::RgbImage;

/// A clamped rectangle describing a sub-image extraction.
///
/// Half-open in both axes: columns `x_start..x_end`, rows `y_start..y_end`.
/// Construction guarantees the rectangle lies inside the source bounds and
/// is never empty for a non-empty source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x_start: u32,
    pub x_end: u32,
    pub y_start: u32,
    pub y_end: u32,
}

impl CropRegion {
    /// Derive a crop rectangle of `crop_w × crop_h` centered on the source
    /// midpoint shifted by `(x_offset, y_offset)`.
    ///
    /// Requested dimensions are clamped to the source dimensions (and up to
    /// one pixel), and the rectangle is shifted back in-bounds if the
    /// offset pushes it past an edge, so large offsets degrade to an
    /// edge-aligned crop instead of an out-of-range slice. The resulting
    /// rectangle is always exactly the clamped size.
    pub fn centered(
        src_w: u32,
        src_h: u32,
        x_offset: i32,
        y_offset: i32,
        crop_w: u32,
        crop_h: u32,
    ) -> Self {
        let cw = crop_w.clamp(1, src_w.max(1));
        let ch = crop_h.clamp(1, src_h.max(1));

        let x_start = clamp_axis(src_w, x_offset, cw);
        let y_start = clamp_axis(src_h, y_offset, ch);

        Self {
            x_start,
            x_end: x_start + cw,
            y_start,
            y_end: y_start + ch,
        }
    }

    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> u32 {
        self.y_end - self.y_start
    }
}

/// Start coordinate of a `len`-long window centered on `size/2 + offset`,
/// clamped into `[0, size - len]`.
fn clamp_axis(size: u32, offset: i32, len: u32) -> u32 {
    let center = size as i64 / 2 + offset as i64;
    let start = center - len as i64 / 2;
    start.clamp(0, (size.max(len) - len) as i64) as u32
}

/// Copy the sub-rectangle out of the source image.
pub fn extract_region(src: &RgbImage, region: &CropRegion) -> RgbImage {
    imageops::crop_imm(src, region.x_start, region.y_start, region.width(), region.height())
        .to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_zero_offset_is_centered() {
        let r = CropRegion::centered(100, 80, 0, 0, 40, 20);
        assert_eq!(r, CropRegion { x_start: 30, x_end: 70, y_start: 30, y_end: 50 });
    }

    #[test]
    fn test_oversize_request_returns_full_source() {
        let r = CropRegion::centered(100, 80, 0, 0, 500, 500);
        assert_eq!(r, CropRegion { x_start: 0, x_end: 100, y_start: 0, y_end: 80 });
    }

    #[test]
    fn test_large_offset_clamps_to_edge() {
        let r = CropRegion::centered(100, 80, 1000, -1000, 40, 20);
        assert_eq!((r.x_start, r.x_end), (60, 100));
        assert_eq!((r.y_start, r.y_end), (0, 20));
        assert_eq!((r.width(), r.height()), (40, 20));
    }

    #[test]
    fn test_moderate_offset_shifts_window() {
        let r = CropRegion::centered(100, 80, 10, -5, 40, 20);
        assert_eq!((r.x_start, r.x_end), (40, 80));
        assert_eq!((r.y_start, r.y_end), (25, 45));
    }

    #[test]
    fn test_zero_requested_size_clamps_to_one_pixel() {
        let r = CropRegion::centered(100, 80, 0, 0, 0, 0);
        assert_eq!((r.width(), r.height()), (1, 1));
    }

    #[test]
    fn test_extract_region_copies_pixels() {
        let mut src = RgbImage::new(10, 10);
        src.put_pixel(5, 5, Rgb([255, 0, 0]));
        let region = CropRegion::centered(10, 10, 0, 0, 4, 4);
        let out = extract_region(&src, &region);
        assert_eq!(out.dimensions(), (4, 4));
        // Source (5,5) lands at (5 - x_start, 5 - y_start) = (2, 2).
        assert_eq!(out.get_pixel(2, 2).0, [255, 0, 0]);
    }

    #[test]
    fn test_extract_full_source_equals_source() {
        let mut src = RgbImage::new(6, 4);
        for (i, p) in src.pixels_mut().enumerate() {
            p.0 = [i as u8, 0, 0];
        }
        let region = CropRegion::centered(6, 4, 0, 0, 99, 99);
        let out = extract_region(&src, &region);
        assert_eq!(out, src);
    }
}
