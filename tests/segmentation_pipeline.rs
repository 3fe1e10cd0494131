use boxparse::{
    decode_mask, BoxParseError, Letterbox, ModelMetadata, ParseParams, PrototypeView, Rect,
    SegmentationParser, Size,
};
use boxparse::{DetectionView, SegmentationBoundingBox};

fn metadata() -> ModelMetadata {
    ModelMetadata::new(Size::new(8, 8), vec!["object".to_string()])
}

fn parser() -> SegmentationParser {
    SegmentationParser::new(metadata()).with_params(ParseParams {
        confidence_threshold: 0.5,
        iou_threshold: 0.5,
    })
}

// Builds a (1, channels, anchors) buffer from per-channel rows.
fn tensor(rows: &[&[f32]]) -> Vec<f32> {
    rows.iter().flat_map(|row| row.iter().copied()).collect()
}

fn parse_one(
    detection: &[f32],
    channels: usize,
    prototype: &[f32],
    origin: Size,
) -> Vec<SegmentationBoundingBox> {
    let view = DetectionView::new(detection, channels, 1).unwrap();
    let protos = PrototypeView::new(prototype, 1, 8, 8).unwrap();
    parser().parse(&view, &protos, origin).unwrap()
}

#[test]
fn mask_dimensions_equal_box_rectangle() {
    // 8x8 model over 8x8 origin: identity mapping, box (2,3)-(6,5).
    let detection = tensor(&[&[4.0], &[4.0], &[4.0], &[2.0], &[0.9], &[1.0]]);
    let prototype = vec![0.0f32; 64];

    let boxes = parse_one(&detection, 6, &prototype, Size::new(8, 8));
    assert_eq!(boxes.len(), 1);

    let rect = boxes[0].bounds.rect;
    assert_eq!(rect, Rect::from_ltrb(2, 3, 6, 5));
    assert_eq!(boxes[0].mask.width(), rect.width());
    assert_eq!(boxes[0].mask.height(), rect.height());
    assert_eq!(boxes[0].mask.as_slice().len(), 8);
}

#[test]
fn zero_activation_decodes_to_half_confidence() {
    let detection = tensor(&[&[4.0], &[4.0], &[4.0], &[4.0], &[0.9], &[1.0]]);
    let prototype = vec![0.0f32; 64];

    let boxes = parse_one(&detection, 6, &prototype, Size::new(8, 8));
    for &value in boxes[0].mask.as_slice() {
        assert!(
            (value - 0.5).abs() <= 1.0 / 255.0,
            "expected ~0.5, got {value}"
        );
    }
}

#[test]
fn strong_activation_saturates_the_mask() {
    let detection = tensor(&[&[4.0], &[4.0], &[4.0], &[4.0], &[0.9], &[1.0]]);
    let prototype = vec![8.0f32; 64];

    let boxes = parse_one(&detection, 6, &prototype, Size::new(8, 8));
    for &value in boxes[0].mask.as_slice() {
        assert!(value > 0.99, "expected saturated confidence, got {value}");
    }
}

#[test]
fn letterboxed_origin_crops_padding_before_resize() {
    // 8x4 origin in an 8x8 model: two-pixel bars top and bottom.
    let detection = tensor(&[&[4.0], &[4.0], &[4.0], &[2.0], &[0.9], &[1.0]]);
    let prototype = vec![0.0f32; 64];

    let boxes = parse_one(&detection, 6, &prototype, Size::new(8, 4));
    let rect = boxes[0].bounds.rect;
    assert_eq!(rect, Rect::from_ltrb(2, 1, 6, 3));
    assert_eq!(boxes[0].mask.width(), 4);
    assert_eq!(boxes[0].mask.height(), 2);
    for &value in boxes[0].mask.as_slice() {
        assert!((value - 0.5).abs() <= 1.0 / 255.0);
    }
}

#[test]
fn masks_are_decoded_only_for_survivors() {
    // Two anchors with the same box; the weaker is suppressed.
    let detection = tensor(&[
        &[4.0, 4.0],
        &[4.0, 4.0],
        &[4.0, 4.0],
        &[4.0, 4.0],
        &[0.9, 0.6],
        &[1.0, 1.0],
    ]);
    let view = DetectionView::new(&detection, 6, 2).unwrap();
    let prototype = vec![0.0f32; 64];
    let protos = PrototypeView::new(&prototype, 1, 8, 8).unwrap();

    let boxes = parser().parse(&view, &protos, Size::new(8, 8)).unwrap();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].bounds.confidence, 0.9);
}

#[test]
fn prototype_channel_mismatch_fails_the_parse() {
    // One class plus one weight channel, but a two-channel prototype tensor.
    let detection = tensor(&[&[4.0], &[4.0], &[4.0], &[4.0], &[0.9], &[1.0]]);
    let view = DetectionView::new(&detection, 6, 1).unwrap();
    let prototype = vec![0.0f32; 128];
    let protos = PrototypeView::new(&prototype, 2, 8, 8).unwrap();

    let err = parser().parse(&view, &protos, Size::new(8, 8)).err().unwrap();
    assert_eq!(
        err,
        BoxParseError::ChannelLayoutMismatch {
            expected: 7,
            got: 6,
        }
    );
}

#[test]
fn decode_mask_rejects_short_weight_vector() {
    let prototype = vec![0.0f32; 128];
    let protos = PrototypeView::new(&prototype, 2, 8, 8).unwrap();
    let origin = Size::new(8, 8);
    let letterbox = Letterbox::fit_snapped(Size::new(8, 8), origin);

    let err = decode_mask(
        &protos,
        &[1.0],
        Rect::from_ltrb(0, 0, 4, 4),
        origin,
        Size::new(8, 8),
        &letterbox,
    )
    .err()
    .unwrap();
    assert_eq!(
        err,
        BoxParseError::MaskChannelMismatch {
            channels: 2,
            weights: 1,
        }
    );
}
