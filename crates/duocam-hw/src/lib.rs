//! duocam-hw — Hardware abstraction for the thermal/RGB camera pair.
//!
//! Provides V4L2-based camera access with an optional raw-passthrough mode
//! for sensors (such as the Topdon TC001) that interleave non-video data
//! into their pixel stream.

pub mod camera;
pub mod frame;

pub use camera::{Camera, CameraError, CaptureRequest, DeviceInfo};
pub use frame::RawFrame;
