//! Instance mask reconstruction from prototype activations.
//!
//! The network emits a low-resolution prototype tensor shared by all boxes
//! plus a per-box weight vector; the mask for a box is the sigmoid of their
//! per-pixel dot product, carried through an 8-bit raster that is rotated
//! upright, stripped of letterbox margins, resized to the origin image and
//! cropped to the box rectangle.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

use crate::geometry::{Rect, Size};
use crate::letterbox::Letterbox;
use crate::tensor::PrototypeView;
use crate::util::{BoxParseError, BoxParseResult};

/// Dense per-pixel confidence grid for one segmented box.
///
/// Dimensions equal the box rectangle exactly; values are in [0, 1] and
/// independent per pixel. Stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Mask {
    /// Returns the mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the confidence at `(x, y)` if within bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    /// Returns the row-major confidence buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Reconstructs the full-resolution mask for one surviving box.
///
/// `weights` is the box's mask weight vector read from the trailing output
/// channels; its length must equal the prototype channel count or the call
/// fails with [`BoxParseError::MaskChannelMismatch`] (a model/metadata
/// contract violation, never retried).
///
/// Letterbox padding is converted into mask-grid units with truncating
/// integer division, which can bias the crop by one pixel at small mask
/// resolutions; this matches the reference behavior. The 8-bit raster round
/// trip bounds per-pixel error to 1/255 of the unquantized sigmoid value.
pub fn decode_mask(
    prototypes: &PrototypeView<'_>,
    weights: &[f32],
    rect: Rect,
    origin: Size,
    model: Size,
    letterbox: &Letterbox,
) -> BoxParseResult<Mask> {
    let channels = prototypes.channels();
    if channels != weights.len() {
        return Err(BoxParseError::MaskChannelMismatch {
            channels,
            weights: weights.len(),
        });
    }

    let mask_width = prototypes.width() as u32;
    let mask_height = prototypes.height() as u32;

    let mut raster = GrayImage::new(mask_width, mask_height);
    for x in 0..mask_width {
        for y in 0..mask_height {
            let mut value = 0.0f32;
            // The raw layout swaps raster axes; the rotate/flip below puts
            // the raster upright.
            for (k, weight) in weights.iter().enumerate() {
                value += prototypes.value(k, x as usize, y as usize) * weight;
            }
            let luminance = luminance_from_confidence(sigmoid(value));
            raster.put_pixel(x, y, Luma([luminance]));
        }
    }

    let raster = imageops::flip_horizontal(&imageops::rotate90(&raster));

    let pad_x = letterbox.x_padding() as u32 * mask_width / model.width;
    let pad_y = letterbox.y_padding() as u32 * mask_height / model.height;
    let cropped = imageops::crop_imm(
        &raster,
        pad_x,
        pad_y,
        mask_width - pad_x * 2,
        mask_height - pad_y * 2,
    )
    .to_image();

    let resized = imageops::resize(&cropped, origin.width, origin.height, FilterType::Triangle);

    let boxed = imageops::crop_imm(
        &resized,
        rect.left as u32,
        rect.top as u32,
        rect.width(),
        rect.height(),
    )
    .to_image();

    let data = boxed
        .pixels()
        .map(|pixel| confidence_from_luminance(pixel.0[0]))
        .collect();

    Ok(Mask {
        width: rect.width(),
        height: rect.height(),
        data,
    })
}

/// Logistic function mapping a raw activation into (0, 1).
pub(crate) fn sigmoid(value: f32) -> f32 {
    let k = value.exp();
    k / (1.0 + k)
}

/// Quantizes a confidence into an inverted 8-bit luminance.
///
/// Higher confidence maps to lower luminance.
pub(crate) fn luminance_from_confidence(confidence: f32) -> u8 {
    (255.0 - confidence * 255.0).round() as u8
}

/// Inverse of [`luminance_from_confidence`], within 1/255 of the input.
pub(crate) fn confidence_from_luminance(luminance: u8) -> f32 {
    (255 - luminance) as f32 / 255.0
}
