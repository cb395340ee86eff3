//! Per-frame preview assembly: decode output in, composited frame out.

use crate::canvas::{fit_to_canvas, gray_to_rgb};
use crate::composite::{side_by_side, CompositeError};
use crate::crop::{extract_region, CropRegion};
use image::{GrayImage, RgbImage};
use serde::Deserialize;

/// Centered crop applied to the visible frame before canvas fitting, to
/// approximate the thermal sensor's narrower field of view.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ZoomParams {
    /// Crop width in source pixels.
    pub width: u32,
    /// Crop height in source pixels.
    pub height: u32,
    /// Horizontal shift of the crop center from the image center.
    #[serde(default)]
    pub x_offset: i32,
    /// Vertical shift of the crop center from the image center.
    #[serde(default)]
    pub y_offset: i32,
}

/// Options for [`compose_preview`].
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Side length of each square canvas.
    pub canvas_size: u32,
    /// Optional zoom crop of the visible frame.
    pub zoom: Option<ZoomParams>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas_size: 512,
            zoom: None,
        }
    }
}

/// One composited preview frame plus the two canvases it was built from.
pub struct PreviewFrame {
    pub thermal_canvas: RgbImage,
    pub rgb_canvas: RgbImage,
    /// Thermal canvas on the left, visible canvas on the right.
    pub combined: RgbImage,
}

/// Build the side-by-side preview from a decoded thermal plane and a
/// visible-light frame.
pub fn compose_preview(
    thermal_visible: &GrayImage,
    rgb: &RgbImage,
    config: &PipelineConfig,
) -> Result<PreviewFrame, CompositeError> {
    let thermal_canvas = fit_to_canvas(&gray_to_rgb(thermal_visible), config.canvas_size);

    let rgb_canvas = match config.zoom {
        Some(zoom) => {
            let region = CropRegion::centered(
                rgb.width(),
                rgb.height(),
                zoom.x_offset,
                zoom.y_offset,
                zoom.width,
                zoom.height,
            );
            fit_to_canvas(&extract_region(rgb, &region), config.canvas_size)
        }
        None => fit_to_canvas(rgb, config.canvas_size),
    };

    let combined = side_by_side(&thermal_canvas, &rgb_canvas)?;
    Ok(PreviewFrame {
        thermal_canvas,
        rgb_canvas,
        combined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::split_dual_plane;
    use duocam_hw::RawFrame;
    use image::Rgb;

    #[test]
    fn test_end_to_end_frame_shapes() {
        // A (384, 256, 2) thermal frame decodes to two (192, 256) planes;
        // with a 720p visible frame and a 512 canvas the combined preview
        // is exactly 512x1024.
        let raw = RawFrame::new(vec![100u8; 384 * 256 * 2], 256, 384, 2, 0).unwrap();
        let planes = split_dual_plane(&raw).unwrap();
        assert_eq!(planes.visible().dimensions(), (256, 192));
        assert_eq!(planes.thermal_raw().dimensions(), (256, 192));

        let rgb = RgbImage::from_pixel(1280, 720, Rgb([50, 60, 70]));
        let config = PipelineConfig::default();
        let preview = compose_preview(planes.visible(), &rgb, &config).unwrap();

        assert_eq!(preview.thermal_canvas.dimensions(), (512, 512));
        assert_eq!(preview.rgb_canvas.dimensions(), (512, 512));
        assert_eq!(preview.combined.dimensions(), (1024, 512));
    }

    #[test]
    fn test_zoom_narrows_visible_field() {
        // A colored marker at the visible frame's center survives the zoom
        // crop and lands in the right half of the composite. The marker is
        // a block so it survives the bilinear downscale.
        let mut rgb = RgbImage::new(1280, 720);
        for y in 350..370 {
            for x in 630..650 {
                rgb.put_pixel(x, y, Rgb([255, 0, 0]));
            }
        }

        let config = PipelineConfig {
            canvas_size: 128,
            zoom: Some(ZoomParams {
                width: 640,
                height: 480,
                x_offset: 0,
                y_offset: 0,
            }),
        };
        let gray = GrayImage::new(256, 192);
        let preview = compose_preview(&gray, &rgb, &config).unwrap();
        assert_eq!(preview.combined.dimensions(), (256, 128));

        let red_in_right_half = preview
            .combined
            .enumerate_pixels()
            .any(|(x, _, p)| x >= 128 && p.0[0] > p.0[1] && p.0[0] > 30);
        assert!(red_in_right_half);
    }

    #[test]
    fn test_combined_layout_left_thermal_right_visible() {
        let gray = GrayImage::from_pixel(100, 100, image::Luma([200]));
        let rgb = RgbImage::from_pixel(100, 100, Rgb([0, 0, 250]));
        let config = PipelineConfig {
            canvas_size: 64,
            zoom: None,
        };
        let preview = compose_preview(&gray, &rgb, &config).unwrap();
        // Square sources fill their canvases, so corners are unambiguous.
        assert_eq!(preview.combined.get_pixel(0, 0).0, [200, 200, 200]);
        assert_eq!(preview.combined.get_pixel(127, 0).0, [0, 0, 250]);
    }
}
