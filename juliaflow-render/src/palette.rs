use juliaflow_core::PixelResult;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::FrameBuffer;
use crate::iteration_buffer::IterationBuffer;

// ---------------------------------------------------------------------------
// Channel overflow
// ---------------------------------------------------------------------------

/// What to do when a palette channel formula exceeds 255.
///
/// The red and green formulas reach 430 and 935 respectively at high
/// iteration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOverflow {
    /// Saturate at 255.
    #[default]
    Clamp,
    /// Keep the low 8 bits, matching storage into a `u8` array.
    Wrap,
}

impl ChannelOverflow {
    #[inline]
    fn apply(self, value: u32) -> u8 {
        match self {
            Self::Clamp => value.min(u8::MAX as u32) as u8,
            Self::Wrap => (value & 0xFF) as u8,
        }
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Deterministic escape-count palette.
///
/// For an escaped sample with count `n` and `v = n mod 256`:
///
/// ```text
/// R = |80 − 2v|
/// G = |100 − 4v| + (n mod 16)
/// B = (n mod 32) · 7
/// ```
///
/// Bounded samples are black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    overflow: ChannelOverflow,
}

impl Palette {
    pub fn new(overflow: ChannelOverflow) -> Self {
        Self { overflow }
    }

    pub fn overflow(&self) -> ChannelOverflow {
        self.overflow
    }

    /// Channel values before overflow handling.
    #[inline]
    pub fn raw_channels(iterations: u32) -> [u32; 3] {
        let v = (iterations % 256) as i64;
        [
            (80 - 2 * v).unsigned_abs() as u32,
            (100 - 4 * v).unsigned_abs() as u32 + iterations % 16,
            (iterations % 32) * 7,
        ]
    }

    /// Map a single kernel result to an RGB triple.
    #[inline]
    pub fn color(&self, result: PixelResult) -> [u8; 3] {
        match result {
            PixelResult::Bounded => [0, 0, 0],
            PixelResult::Escaped { iterations } => {
                let [r, g, b] = Self::raw_channels(iterations);
                [
                    self.overflow.apply(r),
                    self.overflow.apply(g),
                    self.overflow.apply(b),
                ]
            }
        }
    }

    /// Colorize an entire iteration buffer into a fresh RGB frame.
    pub fn colorize(&self, iter_buf: &IterationBuffer) -> FrameBuffer {
        let mut frame = FrameBuffer::new(iter_buf.width, iter_buf.height);
        frame
            .pixels
            .par_chunks_mut(FrameBuffer::CHANNELS)
            .zip(iter_buf.data.par_iter())
            .for_each(|(pixel, &result)| {
                pixel.copy_from_slice(&self.color(result));
            });
        frame
    }
}
