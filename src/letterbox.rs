//! Letterbox geometry between model input space and origin image space.
//!
//! Preprocessing fits the origin image into the fixed model input without
//! distortion, centering it between padding bars. This module derives the
//! scale and padding once per parse call and inverts that mapping for every
//! candidate box.

use crate::geometry::{Rect, Size};

/// Scale and padding of a letterbox fit, with the inverse mapping.
#[derive(Clone, Copy, Debug)]
pub struct Letterbox {
    reduction_ratio: f32,
    x_padding: f32,
    y_padding: f32,
    magnification_ratio: f32,
}

impl Letterbox {
    /// Derives the letterbox applied when `origin` was fit into `model`.
    ///
    /// Padding is kept fractional; this is the detection path.
    pub fn fit(model: Size, origin: Size) -> Self {
        let reduction_ratio = (model.width as f32 / origin.width as f32)
            .min(model.height as f32 / origin.height as f32);

        let x_padding = (model.width as f32 - origin.width as f32 * reduction_ratio) / 2.0;
        let y_padding = (model.height as f32 - origin.height as f32 * reduction_ratio) / 2.0;

        let magnification_ratio = (origin.width as f32 / model.width as f32)
            .max(origin.height as f32 / model.height as f32);

        Self {
            reduction_ratio,
            x_padding,
            y_padding,
            magnification_ratio,
        }
    }

    /// Like [`Letterbox::fit`] but with padding truncated to whole pixels.
    ///
    /// The segmentation path uses this variant so that the same whole-pixel
    /// padding feeds both box mapping and mask cropping.
    pub fn fit_snapped(model: Size, origin: Size) -> Self {
        let mut letterbox = Self::fit(model, origin);
        letterbox.x_padding = letterbox.x_padding.trunc();
        letterbox.y_padding = letterbox.y_padding.trunc();
        letterbox
    }

    /// Returns the scale factor applied when fitting origin into model space.
    pub fn reduction_ratio(&self) -> f32 {
        self.reduction_ratio
    }

    /// Returns the horizontal padding bar width in model-space pixels.
    pub fn x_padding(&self) -> f32 {
        self.x_padding
    }

    /// Returns the vertical padding bar height in model-space pixels.
    pub fn y_padding(&self) -> f32 {
        self.y_padding
    }

    /// Returns the model-to-origin scale factor.
    pub fn magnification_ratio(&self) -> f32 {
        self.magnification_ratio
    }

    /// Maps a model-space box (center, size) into an origin-space rectangle.
    ///
    /// Coordinates are truncated to integers and clamped to the origin
    /// image, so the result satisfies `0 <= left <= right <= origin.width`
    /// and likewise vertically.
    pub fn box_to_origin(&self, cx: f32, cy: f32, w: f32, h: f32, origin: Size) -> Rect {
        let x_min = ((cx - w / 2.0 - self.x_padding) * self.magnification_ratio) as i32;
        let y_min = ((cy - h / 2.0 - self.y_padding) * self.magnification_ratio) as i32;
        let x_max = ((cx + w / 2.0 - self.x_padding) * self.magnification_ratio) as i32;
        let y_max = ((cy + h / 2.0 - self.y_padding) * self.magnification_ratio) as i32;

        Rect::from_ltrb(
            x_min.clamp(0, origin.width as i32),
            y_min.clamp(0, origin.height as i32),
            x_max.clamp(0, origin.width as i32),
            y_max.clamp(0, origin.height as i32),
        )
    }
}
