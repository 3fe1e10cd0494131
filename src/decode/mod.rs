//! Candidate decoding from the raw detection tensor.
//!
//! Every (anchor, class) pair is scanned independently; an anchor may yield
//! one candidate per class that clears the confidence threshold (the decode
//! is multi-label, never argmax). With the `rayon` feature the anchor range
//! is partitioned across workers and the per-anchor lists are merged in
//! anchor order, so the candidate sequence is identical to the serial path
//! and downstream tie-breaking never depends on thread scheduling.

pub(crate) mod nms;

use crate::geometry::{Rect, Size};
use crate::letterbox::Letterbox;
use crate::tensor::DetectionView;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Unconfirmed detection produced by the threshold scan.
///
/// Carries its anchor index so segmentation parsing can read the mask
/// weight channels for survivors and so candidate order stays reproducible.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    /// Anchor index in the detection tensor.
    pub anchor: usize,
    /// Index into the class vocabulary.
    pub class_id: usize,
    /// Box mapped into origin-image space.
    pub rect: Rect,
    /// Class confidence, strictly above the decode threshold.
    pub confidence: f32,
}

/// Scans the detection tensor and returns candidates above `threshold`.
///
/// A confidence equal to the threshold is discarded; only strictly greater
/// values produce candidates. Candidates are ordered by anchor index, then
/// class index.
pub fn decode_candidates(
    output: &DetectionView<'_>,
    classes: usize,
    letterbox: &Letterbox,
    origin: Size,
    threshold: f32,
) -> Vec<Candidate> {
    let anchors = output.anchors();

    #[cfg(feature = "rayon")]
    let per_anchor: Vec<Vec<Candidate>> = (0..anchors)
        .into_par_iter()
        .map(|anchor| decode_anchor(output, anchor, classes, letterbox, origin, threshold))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let per_anchor: Vec<Vec<Candidate>> = (0..anchors)
        .map(|anchor| decode_anchor(output, anchor, classes, letterbox, origin, threshold))
        .collect();

    // Merge in anchor order regardless of which worker produced what.
    per_anchor.into_iter().flatten().collect()
}

fn decode_anchor(
    output: &DetectionView<'_>,
    anchor: usize,
    classes: usize,
    letterbox: &Letterbox,
    origin: Size,
    threshold: f32,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for class_id in 0..classes {
        let confidence = output.value(4 + class_id, anchor);
        if confidence <= threshold {
            continue;
        }

        let cx = output.value(0, anchor);
        let cy = output.value(1, anchor);
        let w = output.value(2, anchor);
        let h = output.value(3, anchor);

        candidates.push(Candidate {
            anchor,
            class_id,
            rect: letterbox.box_to_origin(cx, cy, w, h, origin),
            confidence,
        });
    }

    candidates
}
