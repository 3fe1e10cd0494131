//! Borrowed views over raw model output buffers.
//!
//! The inference engine hands back flat `f32` buffers; these views pair a
//! buffer with its declared shape and validate the length once at
//! construction, so the hot decode loops can index without further checks.
//! The leading batch dimension is always 1 and is implicit.

use crate::util::{BoxParseError, BoxParseResult};

/// Borrowed view of a detection head output shaped `(1, channels, anchors)`.
///
/// Channels 0..4 are the box center/size (`cx`, `cy`, `w`, `h`); channels
/// `4..4+C` are per-class confidences. Segmentation models append `M` mask
/// weight channels after the class block.
#[derive(Copy, Clone)]
pub struct DetectionView<'a> {
    data: &'a [f32],
    channels: usize,
    anchors: usize,
}

impl<'a> DetectionView<'a> {
    /// Creates a view, validating the buffer against the declared shape.
    pub fn new(data: &'a [f32], channels: usize, anchors: usize) -> BoxParseResult<Self> {
        let needed = channels
            .checked_mul(anchors)
            .ok_or(BoxParseError::BufferTooSmall {
                needed: usize::MAX,
                got: data.len(),
            })?;
        if data.len() < needed {
            return Err(BoxParseError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            channels,
            anchors,
        })
    }

    /// Returns the channel count (second tensor dimension).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the anchor count (third tensor dimension).
    pub fn anchors(&self) -> usize {
        self.anchors
    }

    /// Returns the value at `(channel, anchor)`.
    #[inline]
    pub fn value(&self, channel: usize, anchor: usize) -> f32 {
        self.data[channel * self.anchors + anchor]
    }
}

/// Borrowed view of a mask prototype tensor shaped `(1, channels, height, width)`.
#[derive(Copy, Clone)]
pub struct PrototypeView<'a> {
    data: &'a [f32],
    channels: usize,
    height: usize,
    width: usize,
}

impl<'a> PrototypeView<'a> {
    /// Creates a view, validating the buffer against the declared shape.
    pub fn new(
        data: &'a [f32],
        channels: usize,
        height: usize,
        width: usize,
    ) -> BoxParseResult<Self> {
        let needed = channels
            .checked_mul(height)
            .and_then(|v| v.checked_mul(width))
            .ok_or(BoxParseError::BufferTooSmall {
                needed: usize::MAX,
                got: data.len(),
            })?;
        if data.len() < needed {
            return Err(BoxParseError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            channels,
            height,
            width,
        })
    }

    /// Returns the prototype channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the mask grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mask grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the value at `(channel, a, b)` where `a` indexes the third
    /// tensor dimension and `b` the fourth.
    #[inline]
    pub fn value(&self, channel: usize, a: usize, b: usize) -> f32 {
        self.data[(channel * self.height + a) * self.width + b]
    }
}
