use boxparse::{non_max_suppression, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Scored {
    rect: Rect,
    score: f32,
}

fn suppress(items: Vec<Scored>, iou_threshold: f32) -> Vec<Scored> {
    non_max_suppression(items, |item| item.rect, |item| item.score, iou_threshold)
}

fn random_items(seed: u64, count: usize) -> Vec<Scored> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let left = rng.random_range(0..80);
            let top = rng.random_range(0..80);
            let width = rng.random_range(4..20);
            let height = rng.random_range(4..20);
            Scored {
                rect: Rect::from_ltrb(left, top, left + width, top + height),
                score: rng.random_range(0.3..1.0),
            }
        })
        .collect()
}

#[test]
fn survivors_never_overlap_beyond_threshold() {
    let iou_threshold = 0.5;
    let kept = suppress(random_items(7, 200), iou_threshold);

    for (i, a) in kept.iter().enumerate() {
        for b in &kept[i + 1..] {
            assert!(
                a.rect.iou(&b.rect) <= iou_threshold,
                "{:?} and {:?} overlap beyond {iou_threshold}",
                a,
                b
            );
        }
    }
}

#[test]
fn suppression_is_idempotent() {
    let kept = suppress(random_items(11, 200), 0.5);
    let again = suppress(kept.clone(), 0.5);
    assert_eq!(kept, again);
}

#[test]
fn survivors_are_in_descending_score_order() {
    let kept = suppress(random_items(13, 200), 0.5);
    assert!(!kept.is_empty());
    for pair in kept.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn worked_example_keeps_only_the_stronger_box() {
    // The two rectangles overlap with IoU 0.8.
    let strong = Scored {
        rect: Rect::from_ltrb(0, 0, 10, 9),
        score: 0.9,
    };
    let weak = Scored {
        rect: Rect::from_ltrb(0, 1, 10, 10),
        score: 0.6,
    };
    assert!((strong.rect.iou(&weak.rect) - 0.8).abs() < 1e-6);

    let kept = suppress(vec![weak, strong], 0.5);
    assert_eq!(kept, vec![strong]);
}

#[test]
fn equal_scores_resolve_by_input_position() {
    let items: Vec<Scored> = (0..4)
        .map(|i| Scored {
            rect: Rect::from_ltrb(i, 0, i + 10, 10),
            score: 0.7,
        })
        .collect();

    let kept = suppress(items.clone(), 0.5);
    // The first item always wins its overlap group, run after run.
    assert_eq!(kept[0], items[0]);
}
