//! Output parsers orchestrating decode, suppression and mask reconstruction.

use crate::decode::nms::non_max_suppression;
use crate::decode::{decode_candidates, Candidate};
use crate::geometry::Size;
use crate::letterbox::Letterbox;
use crate::mask::decode_mask;
use crate::output::{BoundingBox, ClassLabel, SegmentationBoundingBox};
use crate::tensor::{DetectionView, PrototypeView};
use crate::trace::{trace_event, trace_span};
use crate::util::{BoxParseError, BoxParseResult};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Fixed properties of a loaded model, taken from its metadata.
#[derive(Clone, Debug)]
pub struct ModelMetadata {
    /// Fixed model input dimensions.
    pub input_size: Size,
    /// Ordered class vocabulary.
    pub classes: Vec<String>,
}

impl ModelMetadata {
    /// Creates metadata from the model input size and class vocabulary.
    pub fn new(input_size: Size, classes: Vec<String>) -> Self {
        Self {
            input_size,
            classes,
        }
    }

    fn label(&self, class_id: usize) -> ClassLabel {
        ClassLabel {
            id: class_id,
            name: self.classes[class_id].clone(),
        }
    }

    fn bounding_box(&self, candidate: &Candidate) -> BoundingBox {
        BoundingBox {
            label: self.label(candidate.class_id),
            rect: candidate.rect,
            confidence: candidate.confidence,
        }
    }
}

/// Runtime thresholds for a parse call.
#[derive(Clone, Copy, Debug)]
pub struct ParseParams {
    /// Candidates at or below this confidence are discarded.
    pub confidence_threshold: f32,
    /// Boxes overlapping a selected box beyond this IoU are suppressed.
    pub iou_threshold: f32,
}

impl Default for ParseParams {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.3,
            iou_threshold: 0.45,
        }
    }
}

/// Parser for plain detection model outputs.
pub struct DetectionParser {
    metadata: ModelMetadata,
    params: ParseParams,
}

impl DetectionParser {
    /// Creates a parser with default thresholds.
    pub fn new(metadata: ModelMetadata) -> Self {
        Self {
            metadata,
            params: ParseParams::default(),
        }
    }

    /// Replaces the runtime thresholds.
    pub fn with_params(mut self, params: ParseParams) -> Self {
        self.params = params;
        self
    }

    /// Parses one raw detection tensor into suppressed, ordered boxes.
    ///
    /// The result is in confidence-descending selection order, every box
    /// has `confidence` strictly above the threshold and a rectangle
    /// clamped to `origin`.
    pub fn parse(
        &self,
        output: &DetectionView<'_>,
        origin: Size,
    ) -> BoxParseResult<Vec<BoundingBox>> {
        nonzero(self.metadata.input_size)?;
        nonzero(origin)?;

        let classes = self.metadata.classes.len();
        let expected = 4 + classes;
        if output.channels() != expected {
            return Err(BoxParseError::ChannelLayoutMismatch {
                expected,
                got: output.channels(),
            });
        }

        let _guard = trace_span!("parse_detection").entered();

        let letterbox = Letterbox::fit(self.metadata.input_size, origin);
        let candidates = decode_candidates(
            output,
            classes,
            &letterbox,
            origin,
            self.params.confidence_threshold,
        );
        trace_event!("decoded", candidates = candidates.len());

        let survivors = non_max_suppression(
            candidates,
            |candidate| candidate.rect,
            |candidate| candidate.confidence,
            self.params.iou_threshold,
        );
        trace_event!("suppressed", survivors = survivors.len());

        Ok(survivors
            .iter()
            .map(|candidate| self.metadata.bounding_box(candidate))
            .collect())
    }
}

/// Parser for segmentation model outputs.
///
/// Reads the extended channel layout that appends mask weights after the
/// class block, and reconstructs a mask for each suppression survivor.
pub struct SegmentationParser {
    metadata: ModelMetadata,
    params: ParseParams,
}

impl SegmentationParser {
    /// Creates a parser with default thresholds.
    pub fn new(metadata: ModelMetadata) -> Self {
        Self {
            metadata,
            params: ParseParams::default(),
        }
    }

    /// Replaces the runtime thresholds.
    pub fn with_params(mut self, params: ParseParams) -> Self {
        self.params = params;
        self
    }

    /// Parses the detection and prototype tensors into segmented boxes.
    ///
    /// Masks are decoded only for suppression survivors, independently per
    /// box (in parallel with the `rayon` feature). Each mask's dimensions
    /// equal its box rectangle exactly.
    pub fn parse(
        &self,
        output: &DetectionView<'_>,
        prototypes: &PrototypeView<'_>,
        origin: Size,
    ) -> BoxParseResult<Vec<SegmentationBoundingBox>> {
        nonzero(self.metadata.input_size)?;
        nonzero(origin)?;

        let classes = self.metadata.classes.len();
        let mask_channels = prototypes.channels();
        let expected = 4 + classes + mask_channels;
        if output.channels() != expected {
            return Err(BoxParseError::ChannelLayoutMismatch {
                expected,
                got: output.channels(),
            });
        }

        let _guard = trace_span!("parse_segmentation").entered();

        let model = self.metadata.input_size;
        let letterbox = Letterbox::fit_snapped(model, origin);
        let candidates = decode_candidates(
            output,
            classes,
            &letterbox,
            origin,
            self.params.confidence_threshold,
        );
        trace_event!("decoded", candidates = candidates.len());

        let survivors = non_max_suppression(
            candidates,
            |candidate| candidate.rect,
            |candidate| candidate.confidence,
            self.params.iou_threshold,
        );
        trace_event!("suppressed", survivors = survivors.len());

        let decode_survivor = |candidate: Candidate| -> BoxParseResult<SegmentationBoundingBox> {
            let weights: Vec<f32> = (0..mask_channels)
                .map(|k| output.value(4 + classes + k, candidate.anchor))
                .collect();
            let mask = decode_mask(
                prototypes,
                &weights,
                candidate.rect,
                origin,
                model,
                &letterbox,
            )?;
            Ok(SegmentationBoundingBox {
                bounds: self.metadata.bounding_box(&candidate),
                mask,
            })
        };

        #[cfg(feature = "rayon")]
        let boxes = survivors.into_par_iter().map(decode_survivor).collect();

        #[cfg(not(feature = "rayon"))]
        let boxes = survivors.into_iter().map(decode_survivor).collect();

        boxes
    }
}

fn nonzero(size: Size) -> BoxParseResult<()> {
    if size.width == 0 || size.height == 0 {
        return Err(BoxParseError::InvalidDimensions {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}
