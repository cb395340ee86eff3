//! Interactive capture loop.
//!
//! Both cameras are opened once at start and held for the whole session;
//! each iteration grabs one frame from each in sequence, decodes, fits and
//! composites, then polls the keyboard briefly. Per-frame read or decode
//! failures are logged and skipped — the next iteration retries.

use crate::config::Config;
use crate::term::RawTerminal;
use anyhow::{Context, Result};
use duocam_core::pipeline::{compose_preview, PreviewFrame};
use duocam_core::split_dual_plane;
use duocam_hw::{frame::yuyv_to_rgb, Camera};
use image::RgbImage;
use std::path::Path;

const KEY_POLL_MS: i32 = 100;

pub fn run(config: &Config, output_dir: &Path, max_frames: Option<u64>) -> Result<()> {
    // Startup failures are terminal: with zero source frames there is
    // nothing to composite.
    let thermal = Camera::open(&config.thermal.device, &config.thermal_request())
        .context("thermal camera init failed")?;
    let rgb = Camera::open(&config.rgb.device, &config.rgb_request())
        .context("rgb camera init failed")?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let term = match RawTerminal::new() {
        Ok(term) => Some(term),
        Err(e) => {
            tracing::info!(error = %e, "stdin is not a terminal, keyboard control disabled");
            None
        }
    };

    let pipeline = config.pipeline();
    tracing::info!(
        thermal = %thermal.device_path,
        rgb = %rgb.device_path,
        canvas_size = pipeline.canvas_size,
        "capture loop starting; press 's' to save, 'q' to quit"
    );

    let mut composed: u64 = 0;
    loop {
        match next_preview(&thermal, &rgb, config) {
            Ok(preview) => {
                composed += 1;
                tracing::debug!(
                    frames = composed,
                    width = preview.combined.width(),
                    height = preview.combined.height(),
                    "composited preview frame"
                );

                match poll_command(term.as_ref())? {
                    Some(Command::Save) => save_pair(&preview, output_dir)?,
                    Some(Command::Quit) => break,
                    None => {}
                }
            }
            // Skip-and-report: the next iteration is the retry.
            Err(e) => {
                tracing::warn!(error = %e, "no frame this cycle");
                if matches!(poll_command(term.as_ref())?, Some(Command::Quit)) {
                    break;
                }
            }
        }

        if max_frames.is_some_and(|limit| composed >= limit) {
            tracing::info!(frames = composed, "frame limit reached");
            break;
        }
    }

    tracing::info!(frames = composed, "capture loop finished");
    Ok(())
}

/// One full pipeline pass: grab thermal, decode, grab visible, convert,
/// compose. Any failure aborts this cycle only.
fn next_preview(thermal: &Camera, rgb: &Camera, config: &Config) -> Result<PreviewFrame> {
    let raw = thermal.grab().context("thermal read")?;
    let planes = split_dual_plane(&raw).context("thermal decode")?;

    let rgb_raw = rgb.grab().context("rgb read")?;
    let rgb_bytes = yuyv_to_rgb(&rgb_raw).context("rgb convert")?;
    let rgb_image = RgbImage::from_raw(rgb_raw.width, rgb_raw.height, rgb_bytes)
        .context("rgb buffer did not match its dimensions")?;

    compose_preview(planes.visible(), &rgb_image, &config.pipeline()).context("compose")
}

enum Command {
    Save,
    Quit,
}

fn poll_command(term: Option<&RawTerminal>) -> Result<Option<Command>> {
    let Some(term) = term else {
        return Ok(None);
    };
    Ok(match term.poll_key(KEY_POLL_MS)? {
        Some(b's') | Some(b'S') => Some(Command::Save),
        // Ctrl-C arrives as 0x03 in raw mode.
        Some(b'q') | Some(b'Q') | Some(0x03) => Some(Command::Quit),
        _ => None,
    })
}

/// Write the two canvases as independent PNGs, timestamp-stemmed so the
/// merge subcommand can pair them later by filename.
fn save_pair(preview: &PreviewFrame, output_dir: &Path) -> Result<()> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let thermal_path = output_dir.join(format!("{stamp}_thermal.png"));
    let rgb_path = output_dir.join(format!("{stamp}_rgb.png"));

    preview
        .thermal_canvas
        .save(&thermal_path)
        .with_context(|| format!("failed to save {}", thermal_path.display()))?;
    preview
        .rgb_canvas
        .save(&rgb_path)
        .with_context(|| format!("failed to save {}", rgb_path.display()))?;

    tracing::info!(
        thermal = %thermal_path.display(),
        rgb = %rgb_path.display(),
        "saved image pair"
    );
    Ok(())
}
