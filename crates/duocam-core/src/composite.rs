//! Side-by-side compositing and letterbox stripping.

use image::imageops;
use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("height mismatch: left is {left} rows, right is {right}")]
    HeightMismatch { left: u32, right: u32 },
    #[error("padding of {padding} rows leaves nothing of a {height}-row image")]
    PaddingTooLarge { padding: u32, height: u32 },
}

/// Concatenate two images horizontally. Both must share a height; by
/// convention the thermal-derived canvas goes on the left and the
/// visible-derived canvas on the right.
pub fn side_by_side(left: &RgbImage, right: &RgbImage) -> Result<RgbImage, CompositeError> {
    if left.height() != right.height() {
        return Err(CompositeError::HeightMismatch {
            left: left.height(),
            right: right.height(),
        });
    }

    let mut out = RgbImage::new(left.width() + right.width(), left.height());
    imageops::replace(&mut out, left, 0, 0);
    imageops::replace(&mut out, right, left.width() as i64, 0);
    Ok(out)
}

/// Remove `padding` rows from the top and bottom of an image.
///
/// This is the batch-merge primitive: saved canvases carry symmetric
/// letterbox bars, and stripping a known count of padding rows recovers the
/// image content before pairing.
pub fn strip_letterbox(src: &RgbImage, padding: u32) -> Result<RgbImage, CompositeError> {
    if 2 * padding >= src.height() {
        return Err(CompositeError::PaddingTooLarge {
            padding,
            height: src.height(),
        });
    }
    Ok(imageops::crop_imm(src, 0, padding, src.width(), src.height() - 2 * padding).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([value, value, value]))
    }

    #[test]
    fn test_side_by_side_doubles_width() {
        let out = side_by_side(&solid(512, 512, 10), &solid(512, 512, 20)).unwrap();
        assert_eq!(out.dimensions(), (1024, 512));
        assert_eq!(out.get_pixel(0, 0).0, [10, 10, 10]);
        assert_eq!(out.get_pixel(511, 511).0, [10, 10, 10]);
        assert_eq!(out.get_pixel(512, 0).0, [20, 20, 20]);
        assert_eq!(out.get_pixel(1023, 511).0, [20, 20, 20]);
    }

    #[test]
    fn test_side_by_side_unequal_widths() {
        let out = side_by_side(&solid(30, 50, 1), &solid(100, 50, 2)).unwrap();
        assert_eq!(out.dimensions(), (130, 50));
    }

    #[test]
    fn test_side_by_side_height_mismatch() {
        let err = side_by_side(&solid(10, 20, 1), &solid(10, 21, 2)).unwrap_err();
        assert!(matches!(err, CompositeError::HeightMismatch { left: 20, right: 21 }));
    }

    #[test]
    fn test_strip_letterbox() {
        let out = strip_letterbox(&solid(100, 50, 9), 10).unwrap();
        assert_eq!(out.dimensions(), (100, 30));
    }

    #[test]
    fn test_strip_letterbox_keeps_center_rows() {
        let mut src = solid(4, 10, 0);
        src.put_pixel(0, 3, Rgb([77, 0, 0]));
        let out = strip_letterbox(&src, 3).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get_pixel(0, 0).0, [77, 0, 0]);
    }

    #[test]
    fn test_strip_letterbox_rejects_excess_padding() {
        assert!(strip_letterbox(&solid(10, 50, 0), 25).is_err());
        assert!(strip_letterbox(&solid(10, 50, 0), 24).is_ok());
    }

    #[test]
    fn test_merge_scenario_dimensions() {
        // 100x50 pair with padding 10: each strips to 100x30, concat 200x30.
        let thermal = strip_letterbox(&solid(100, 50, 1), 10).unwrap();
        let rgb = strip_letterbox(&solid(100, 50, 2), 10).unwrap();
        let combined = side_by_side(&thermal, &rgb).unwrap();
        assert_eq!(combined.dimensions(), (200, 30));
    }
}
