//! boxparse turns raw detection-model output tensors into typed results.
//!
//! Given the float tensors a YOLOv8-style network produces and the original
//! image dimensions, this crate inverts the letterbox resize, thresholds the
//! anchor grid, suppresses overlapping candidates and — for segmentation
//! models — reconstructs a per-box pixel mask, with optional parallelism via
//! the `rayon` feature. Running the network, decoding images and parsing
//! model metadata are left to the caller.

pub mod geometry;
pub mod letterbox;
pub mod mask;
pub mod output;
pub mod parser;
pub mod tensor;
pub mod util;

mod decode;
mod trace;

pub use geometry::{Rect, Size};
pub use letterbox::Letterbox;
pub use mask::{decode_mask, Mask};
pub use output::{
    BoundingBox, ClassLabel, Detection, Keypoint, PoseBoundingBox, SegmentationBoundingBox,
};
pub use parser::{DetectionParser, ModelMetadata, ParseParams, SegmentationParser};
pub use tensor::{DetectionView, PrototypeView};
pub use util::{BoxParseError, BoxParseResult};

pub use decode::nms::non_max_suppression;
pub use decode::{decode_candidates, Candidate};
