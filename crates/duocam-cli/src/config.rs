//! TOML configuration with per-field defaults.
//!
//! Every field is optional; an absent config file means "all defaults",
//! which matches the reference rig: thermal sensor on /dev/video0 at
//! 256×384 (dual-plane), RGB camera on /dev/video2 at 1280×720, 512-pixel
//! canvases, zoom disabled.

use anyhow::Context;
use duocam_core::{PipelineConfig, ZoomParams};
use duocam_hw::CaptureRequest;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thermal: DeviceConfig,
    pub rgb: DeviceConfig,
    pub output: OutputConfig,
}

/// One camera's device path and requested resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub device: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Side length of each square letterboxed canvas.
    pub canvas_size: u32,
    /// Optional centered crop of the visible frame before fitting.
    pub zoom: Option<ZoomParams>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thermal: DeviceConfig {
                device: "/dev/video0".to_string(),
                // The sensor reports 256 columns and 384 rows: two stacked
                // 192-row sub-images.
                width: 256,
                height: 384,
            },
            rgb: DeviceConfig {
                device: "/dev/video2".to_string(),
                width: 1280,
                height: 720,
            },
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            canvas_size: 512,
            zoom: None,
        }
    }
}

impl Config {
    /// Load from a TOML file, or all defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Capture request for the thermal sensor: raw passthrough so the
    /// dual-plane bytes are not mangled by a YUV conversion.
    pub fn thermal_request(&self) -> CaptureRequest {
        CaptureRequest {
            width: self.thermal.width,
            height: self.thermal.height,
            raw_passthrough: true,
        }
    }

    /// Capture request for the visible-light camera.
    pub fn rgb_request(&self) -> CaptureRequest {
        CaptureRequest {
            width: self.rgb.width,
            height: self.rgb.height,
            raw_passthrough: false,
        }
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            canvas_size: self.output.canvas_size,
            zoom: self.output.zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.thermal.device, "/dev/video0");
        assert_eq!((config.thermal.width, config.thermal.height), (256, 384));
        assert_eq!(config.rgb.device, "/dev/video2");
        assert_eq!(config.output.canvas_size, 512);
        assert!(config.output.zoom.is_none());
        assert!(config.thermal_request().raw_passthrough);
        assert!(!config.rgb_request().raw_passthrough);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [output]
            canvas_size = 256

            [output.zoom]
            width = 640
            height = 480
            x_offset = -12
            "#,
        )
        .unwrap();
        assert_eq!(config.output.canvas_size, 256);
        let zoom = config.output.zoom.unwrap();
        assert_eq!((zoom.width, zoom.height), (640, 480));
        assert_eq!((zoom.x_offset, zoom.y_offset), (-12, 0));
        // Untouched sections keep their defaults.
        assert_eq!(config.thermal.device, "/dev/video0");
        assert_eq!(config.rgb.width, 1280);
    }

    #[test]
    fn test_device_override_toml() {
        let config: Config = toml::from_str(
            r#"
            [thermal]
            device = "/dev/video4"
            width = 256
            height = 384
            "#,
        )
        .unwrap();
        assert_eq!(config.thermal.device, "/dev/video4");
    }
}
