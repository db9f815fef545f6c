use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Parameters controlling Julia iteration.
///
/// `c` is not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalParameters {
    /// The fixed constant in `z ← z² + c`.
    pub c: Complex,

    /// Maximum number of iterations before a sample counts as bounded.
    pub max_iterations: u32,

    /// Bailout threshold compared against `|z|²`, so no square root is taken.
    pub escape_radius_sq: f64,
}

impl FractalParameters {
    pub const DEFAULT_C: Complex = Complex { re: 0.36, im: 0.36 };
    pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000;
    pub const DEFAULT_ESCAPE_RADIUS_SQ: f64 = 4.0;

    pub fn new(c: Complex, max_iterations: u32, escape_radius_sq: f64) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        if escape_radius_sq <= 0.0 || escape_radius_sq.is_nan() {
            return Err(CoreError::InvalidEscapeRadius(escape_radius_sq));
        }
        Ok(Self {
            c,
            max_iterations,
            escape_radius_sq,
        })
    }

    /// Return a copy with a different constant.
    pub fn with_c(self, c: Complex) -> Self {
        Self { c, ..self }
    }

    /// Return a copy with a different `max_iterations` value.
    pub fn with_max_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}

impl Default for FractalParameters {
    fn default() -> Self {
        Self {
            c: Self::DEFAULT_C,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            escape_radius_sq: Self::DEFAULT_ESCAPE_RADIUS_SQ,
        }
    }
}
