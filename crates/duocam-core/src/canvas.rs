//! Aspect-preserving canvas fitting.

use image::imageops::{self, FilterType};
use image::{GrayImage, Rgb, RgbImage};

/// Fit an image into a square canvas of side `target_size`, preserving
/// aspect ratio, centered, with symmetric black letterbox padding.
///
/// Landscape sources fill the full width; portrait and square sources fill
/// the full height (a square source therefore fills the canvas exactly,
/// with zero padding). When the leftover space is odd the extra pixel goes
/// to the bottom/right pad — asymmetric by at most one pixel, accepted.
/// Resizing is bilinear. The output is always exactly
/// `target_size × target_size`; the source is never distorted or clipped.
pub fn fit_to_canvas(src: &RgbImage, target_size: u32) -> RgbImage {
    let mut canvas = RgbImage::new(target_size, target_size);
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 || target_size == 0 {
        return canvas;
    }

    let aspect = w as f64 / h as f64;
    let (fit_w, fit_h) = if aspect > 1.0 {
        (target_size, ((target_size as f64 / aspect).round() as u32).max(1))
    } else {
        (((target_size as f64 * aspect).round() as u32).max(1), target_size)
    };

    let pad_x = (target_size - fit_w) / 2;
    let pad_y = (target_size - fit_h) / 2;

    let resized = imageops::resize(src, fit_w, fit_h, FilterType::Triangle);
    imageops::replace(&mut canvas, &resized, pad_x as i64, pad_y as i64);
    canvas
}

/// Expand a grayscale plane to 3-channel RGB by replicating the intensity.
pub fn gray_to_rgb(src: &GrayImage) -> RgbImage {
    RgbImage::from_fn(src.width(), src.height(), |x, y| {
        let v = src.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    })
}
