//! Greedy non-maximum suppression over scored rectangles.

use crate::geometry::Rect;

/// Reduces overlapping items to a non-redundant subset.
///
/// Items are ranked by descending score with the original item index as a
/// stable secondary key, so equal scores resolve the same way on every run.
/// The highest-ranked remaining item is selected, every remaining item whose
/// IoU with it exceeds `iou_threshold` is dropped, and the process repeats.
/// Suppression is global: items are never grouped by class or any other key
/// before comparison. The result is in selection order, i.e. descending
/// score among survivors. O(n²) worst case.
pub fn non_max_suppression<T, R, S>(
    items: Vec<T>,
    rect: R,
    score: S,
    iou_threshold: f32,
) -> Vec<T>
where
    R: Fn(&T) -> Rect,
    S: Fn(&T) -> f32,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        score(&items[b])
            .total_cmp(&score(&items[a]))
            .then_with(|| a.cmp(&b))
    });

    let mut suppressed = vec![false; items.len()];
    let mut selected: Vec<usize> = Vec::new();

    for (pos, &idx) in order.iter().enumerate() {
        if suppressed[idx] {
            continue;
        }
        selected.push(idx);

        let kept = rect(&items[idx]);
        for &other in &order[pos + 1..] {
            if suppressed[other] {
                continue;
            }
            if kept.iou(&rect(&items[other])) > iou_threshold {
                suppressed[other] = true;
            }
        }
    }

    // Move the selected items out in selection order.
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    selected
        .into_iter()
        .map(|idx| slots[idx].take().expect("selected index taken once"))
        .collect()
}
