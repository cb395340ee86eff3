//! duocam-core — Frame decomposition and compositing pipeline.
//!
//! Splits the thermal sensor's dual-plane frames into visible and
//! raw-thermal planes, normalizes arbitrary-aspect images onto square
//! letterboxed canvases, and composites the two modalities side by side.

pub mod canvas;
pub mod composite;
pub mod crop;
pub mod decode;
pub mod pipeline;

pub use canvas::{fit_to_canvas, gray_to_rgb};
pub use composite::{side_by_side, strip_letterbox, CompositeError};
pub use crop::{extract_region, CropRegion};
pub use decode::{split_dual_plane, DecodeError, DecodedPlanes};
pub use pipeline::{compose_preview, PipelineConfig, PreviewFrame, ZoomParams};
