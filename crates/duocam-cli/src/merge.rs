//! Batch merge of saved image pairs.
//!
//! Walks a directory of captures, pairs every `*_thermal.png` with the
//! same-stem `*_rgb.png`, strips the letterbox padding from both, and
//! writes the horizontal concatenation as `*_combined.png`. Unpaired or
//! unreadable files are warned about and skipped.

use anyhow::{Context, Result};
use duocam_core::{side_by_side, strip_letterbox};
use std::path::Path;

const THERMAL_SUFFIX: &str = "_thermal.png";
const RGB_SUFFIX: &str = "_rgb.png";
const COMBINED_SUFFIX: &str = "_combined.png";

pub fn run(directory: &Path, padding: u32) -> Result<()> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("failed to read directory {}", directory.display()))?;

    let mut thermal_names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(THERMAL_SUFFIX))
        .collect();
    thermal_names.sort();

    let mut processed = 0usize;
    let mut skipped = 0usize;

    for thermal_name in &thermal_names {
        match merge_one(directory, thermal_name, padding) {
            Ok(output) => {
                processed += 1;
                tracing::info!(output = %output, "wrote combined image");
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(thermal = %thermal_name, error = %e, "skipping pair");
            }
        }
    }

    tracing::info!(processed, skipped, "merge finished");
    Ok(())
}

fn merge_one(directory: &Path, thermal_name: &str, padding: u32) -> Result<String> {
    let partner = rgb_partner(thermal_name)
        .context("filename does not follow the *_thermal.png convention")?;
    let rgb_path = directory.join(&partner);
    if !rgb_path.exists() {
        anyhow::bail!("missing pair: no {partner}");
    }
    let thermal_path = directory.join(thermal_name);

    let thermal_img = image::open(&thermal_path)
        .with_context(|| format!("failed to open {}", thermal_path.display()))?
        .to_rgb8();
    let rgb_img = image::open(&rgb_path)
        .with_context(|| format!("failed to open {}", rgb_path.display()))?
        .to_rgb8();

    let thermal_img = strip_letterbox(&thermal_img, padding)?;
    let rgb_img = strip_letterbox(&rgb_img, padding)?;
    let combined = side_by_side(&thermal_img, &rgb_img)?;

    let output_name = combined_name(thermal_name)
        .context("filename does not follow the *_thermal.png convention")?;
    let output_path = directory.join(&output_name);
    combined
        .save(&output_path)
        .with_context(|| format!("failed to save {}", output_path.display()))?;
    Ok(output_name)
}

/// `<stem>_thermal.png` → `<stem>_rgb.png`.
fn rgb_partner(thermal_name: &str) -> Option<String> {
    thermal_name
        .strip_suffix(THERMAL_SUFFIX)
        .map(|stem| format!("{stem}{RGB_SUFFIX}"))
}

/// `<stem>_thermal.png` → `<stem>_combined.png`.
fn combined_name(thermal_name: &str) -> Option<String> {
    thermal_name
        .strip_suffix(THERMAL_SUFFIX)
        .map(|stem| format!("{stem}{COMBINED_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_pair_naming() {
        assert_eq!(
            rgb_partner("20240101_120000_thermal.png").as_deref(),
            Some("20240101_120000_rgb.png")
        );
        assert_eq!(
            combined_name("20240101_120000_thermal.png").as_deref(),
            Some("20240101_120000_combined.png")
        );
        assert_eq!(rgb_partner("snapshot.png"), None);
    }

    #[test]
    fn test_merge_directory_end_to_end() {
        let dir = std::env::temp_dir().join(format!("duocam-merge-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let img = RgbImage::from_pixel(100, 50, Rgb([1, 2, 3]));
        img.save(dir.join("a_thermal.png")).unwrap();
        img.save(dir.join("a_rgb.png")).unwrap();
        // An unpaired thermal file: warned about, not fatal.
        img.save(dir.join("b_thermal.png")).unwrap();

        run(&dir, 10).unwrap();

        let combined = image::open(dir.join("a_combined.png")).unwrap().to_rgb8();
        assert_eq!(combined.dimensions(), (200, 30));
        assert!(!dir.join("b_combined.png").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
