//! V4L2 camera capture via the `v4l` crate.

use crate::frame::RawFrame;
use std::path::Path;
use thiserror::Error;
use v4l::buffer::Type as BufType;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;
use v4l::FourCC;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("device unavailable: {path}: {reason}")]
    DeviceUnavailable { path: String, reason: String },
    #[error("frame read failed: {0}")]
    FrameReadFailed(String),
    #[error("not a video capture device: {0}")]
    NotACaptureDevice(String),
}

/// Info about a discovered V4L2 device.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub path: String,
    pub name: String,
    pub driver: String,
    pub bus: String,
}

/// Requested capture parameters.
///
/// Dimensions are best-effort: the driver may negotiate something else, and
/// the negotiated values are what the camera reports afterwards. With
/// `raw_passthrough` set, the 2-byte-per-pixel YUYV stream is handed to the
/// caller untouched instead of being treated as video — this is how the
/// thermal sensor's dual-plane frames pass through unmangled.
#[derive(Debug, Clone, Copy)]
pub struct CaptureRequest {
    pub width: u32,
    pub height: u32,
    pub raw_passthrough: bool,
}

/// Persistent V4L2 camera device handle.
///
/// The device stays open for the lifetime of this value; the kernel
/// resources are released on drop. One instance per physical device.
pub struct Camera {
    device: Device,
    pub width: u32,
    pub height: u32,
    pub device_path: String,
    raw_passthrough: bool,
}

impl Camera {
    /// Open a V4L2 camera device by path (e.g., "/dev/video0").
    pub fn open(device_path: &str, request: &CaptureRequest) -> Result<Self, CameraError> {
        if !Path::new(device_path).exists() {
            return Err(CameraError::DeviceUnavailable {
                path: device_path.to_string(),
                reason: "no such device node".to_string(),
            });
        }

        let device = Device::with_path(device_path).map_err(|e| CameraError::DeviceUnavailable {
            path: device_path.to_string(),
            reason: e.to_string(),
        })?;

        let caps = device.query_caps().map_err(|e| CameraError::DeviceUnavailable {
            path: device_path.to_string(),
            reason: format!("failed to query capabilities: {e}"),
        })?;

        if !caps.capabilities.contains(v4l::capability::Flags::VIDEO_CAPTURE) {
            return Err(CameraError::NotACaptureDevice(device_path.to_string()));
        }

        tracing::info!(
            device = device_path,
            driver = %caps.driver,
            card = %caps.card,
            "opened camera"
        );

        let mut fmt = device.format().map_err(|e| CameraError::DeviceUnavailable {
            path: device_path.to_string(),
            reason: format!("failed to get format: {e}"),
        })?;

        fmt.fourcc = FourCC::new(b"YUYV");
        fmt.width = request.width;
        fmt.height = request.height;

        let negotiated = device.set_format(&fmt).map_err(|e| CameraError::DeviceUnavailable {
            path: device_path.to_string(),
            reason: format!("failed to set format: {e}"),
        })?;

        if negotiated.fourcc != FourCC::new(b"YUYV") {
            return Err(CameraError::DeviceUnavailable {
                path: device_path.to_string(),
                reason: format!("unsupported pixel format: {:?} (need YUYV)", negotiated.fourcc),
            });
        }

        if negotiated.width != request.width || negotiated.height != request.height {
            tracing::warn!(
                device = device_path,
                requested_width = request.width,
                requested_height = request.height,
                width = negotiated.width,
                height = negotiated.height,
                "driver negotiated a different resolution"
            );
        }

        Ok(Self {
            device,
            width: negotiated.width,
            height: negotiated.height,
            device_path: device_path.to_string(),
            raw_passthrough: request.raw_passthrough,
        })
    }

    /// Whether this camera was opened in raw-passthrough mode.
    pub fn is_raw_passthrough(&self) -> bool {
        self.raw_passthrough
    }

    /// Capture one frame as a 2-channel raw buffer (YUYV is 2 bytes/pixel).
    ///
    /// In passthrough mode the two channels are whatever the sensor put
    /// there; otherwise they are Y and interleaved chroma, and
    /// [`frame::yuyv_to_rgb`](crate::frame::yuyv_to_rgb) turns them into a
    /// displayable image.
    pub fn grab(&self) -> Result<RawFrame, CameraError> {
        let mut stream = MmapStream::with_buffers(&self.device, BufType::VideoCapture, 4)
            .map_err(|e| CameraError::FrameReadFailed(format!("failed to create mmap stream: {e}")))?;

        let (buf, meta) = stream
            .next()
            .map_err(|e| CameraError::FrameReadFailed(format!("failed to dequeue buffer: {e}")))?;

        RawFrame::new(buf.to_vec(), self.width, self.height, 2, meta.sequence)
            .map_err(|e| CameraError::FrameReadFailed(e.to_string()))
    }

    /// List available V4L2 video capture devices.
    pub fn list_devices() -> Vec<DeviceInfo> {
        let mut devices = Vec::new();

        for i in 0..16 {
            let path = format!("/dev/video{i}");
            if !Path::new(&path).exists() {
                continue;
            }
            let Ok(dev) = Device::with_path(&path) else {
                continue;
            };
            let Ok(caps) = dev.query_caps() else {
                continue;
            };
            if !caps.capabilities.contains(v4l::capability::Flags::VIDEO_CAPTURE) {
                continue;
            }
            devices.push(DeviceInfo {
                path,
                name: caps.card.clone(),
                driver: caps.driver.clone(),
                bus: caps.bus.clone(),
            });
        }

        devices
    }
}
