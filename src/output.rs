//! Typed detection results.
//!
//! The result family shares a base field set (class label, rectangle,
//! confidence) with variant-specific payloads; heterogeneous collections use
//! the [`Detection`] enum and match on it explicitly.

use crate::geometry::Rect;
use crate::mask::Mask;

/// Entry in the class vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassLabel {
    /// Index into the vocabulary.
    pub id: usize,
    /// Human-readable class name.
    pub name: String,
}

/// Detected box with class label and confidence.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// Class the box belongs to.
    pub label: ClassLabel,
    /// Box in origin-image pixel space.
    pub rect: Rect,
    /// Confidence, strictly above the configured threshold.
    pub confidence: f32,
}

/// Detected box with a per-pixel instance mask.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationBoundingBox {
    /// Shared box fields.
    pub bounds: BoundingBox,
    /// Confidence grid with dimensions equal to the box rectangle.
    pub mask: Mask,
}

/// Single pose keypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    /// Keypoint index within the pose skeleton.
    pub index: usize,
    /// X coordinate in origin-image pixel space.
    pub x: i32,
    /// Y coordinate in origin-image pixel space.
    pub y: i32,
    /// Keypoint confidence.
    pub confidence: f32,
}

/// Detected box with pose keypoints, at most one per index.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseBoundingBox {
    /// Shared box fields.
    pub bounds: BoundingBox,
    /// Keypoints in skeleton order.
    pub keypoints: Vec<Keypoint>,
}

impl PoseBoundingBox {
    /// Returns the keypoint with the given index, if present.
    pub fn keypoint(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.iter().find(|keypoint| keypoint.index == index)
    }
}

/// Any member of the detection result family.
#[derive(Clone, Debug, PartialEq)]
pub enum Detection {
    /// Plain detection box.
    Box(BoundingBox),
    /// Box with an instance mask.
    Segmentation(SegmentationBoundingBox),
    /// Box with pose keypoints.
    Pose(PoseBoundingBox),
}

impl Detection {
    /// Returns the shared base fields of any variant.
    pub fn bounds(&self) -> &BoundingBox {
        match self {
            Detection::Box(bounding_box) => bounding_box,
            Detection::Segmentation(segmentation) => &segmentation.bounds,
            Detection::Pose(pose) => &pose.bounds,
        }
    }
}
