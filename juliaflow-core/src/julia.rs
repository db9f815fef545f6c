use crate::complex::Complex;
use crate::params::FractalParameters;

/// Outcome of iterating a single sample.
///
/// Only the raw escape count is kept; turning it into a colour is the
/// palette's job in `juliaflow-render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelResult {
    /// `|z|²` exceeded the threshold before step `iterations` was applied.
    Escaped { iterations: u32 },

    /// The orbit stayed bounded for the whole iteration budget.
    Bounded,
}

impl PixelResult {
    #[inline]
    pub fn escaped(&self) -> bool {
        matches!(self, Self::Escaped { .. })
    }

    /// Iterations consumed, reporting `max_iterations` for bounded samples.
    #[inline]
    pub fn iterations_used(&self, max_iterations: u32) -> u32 {
        match *self {
            Self::Escaped { iterations } => iterations,
            Self::Bounded => max_iterations,
        }
    }
}

/// Escape-time evaluation of `z ← z² + c` starting from `z0`.
///
/// The magnitude test runs on the current `z` before it is advanced, so a
/// sample already outside the threshold reports zero iterations. Divergent
/// orbits may reach infinity; those compare above any finite threshold and
/// NaN is treated as escaped as well, so the loop always terminates.
#[inline]
pub fn escape_time(z0: Complex, params: &FractalParameters) -> PixelResult {
    let limit = params.escape_radius_sq;
    let c = params.c;
    let (mut re, mut im) = (z0.re, z0.im);

    for n in 0..params.max_iterations {
        let re2 = re * re;
        let im2 = im * im;
        let norm_sq = re2 + im2;
        if norm_sq > limit || norm_sq.is_nan() {
            return PixelResult::Escaped { iterations: n };
        }
        let next_re = re2 - im2 + c.re;
        im = 2.0 * re * im + c.im;
        re = next_re;
    }

    PixelResult::Bounded
}

/// A Julia set for a fixed constant, ready to evaluate individual samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Julia {
    params: FractalParameters,
}

impl Julia {
    pub fn new(params: FractalParameters) -> Self {
        Self { params }
    }

    #[inline]
    pub fn iterate(&self, z0: Complex) -> PixelResult {
        escape_time(z0, &self.params)
    }

    pub fn c(&self) -> Complex {
        self.params.c
    }

    pub fn params(&self) -> &FractalParameters {
        &self.params
    }
}
