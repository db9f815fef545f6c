use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// Smallest plane extent a zoom may shrink the viewport to.
///
/// Below this the per-pixel step approaches the `f64` spacing of typical
/// centre coordinates and neighbouring samples collapse onto each other.
pub const MIN_PLANE_EXTENT: f64 = 1e-12;

/// Largest plane extent a zoom may grow the viewport to.
pub const MAX_PLANE_EXTENT: f64 = 1e6;

/// The rectangular region of the complex plane mapped onto the pixel grid.
///
/// Unlike a per-pixel scale, the extents are stored directly so that the
/// horizontal and vertical spans can be zoomed independently of resolution.
/// Row 0 of the pixel grid corresponds to [`y_min`](Self::y_min).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Centre of the viewport in the complex plane.
    pub center: Complex,

    /// Horizontal span in plane units.
    pub plane_width: f64,

    /// Vertical span in plane units.
    pub plane_height: f64,

    /// Resolution in pixels.
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const DEFAULT_EXTENT: f64 = 5.0;

    /// Create a viewport, rejecting empty resolutions and non-positive extents.
    pub fn new(
        center: Complex,
        plane_width: f64,
        plane_height: f64,
        width: u32,
        height: u32,
    ) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be > 0, got {width}×{height}"),
            });
        }
        for (name, extent) in [("width", plane_width), ("height", plane_height)] {
            if extent <= 0.0 || !extent.is_finite() {
                return Err(CoreError::InvalidViewport {
                    reason: format!("plane {name} must be positive and finite, got {extent}"),
                });
            }
        }
        if !center.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("center must be finite, got {center}"),
            });
        }
        Ok(Self {
            center,
            plane_width,
            plane_height,
            width,
            height,
        })
    }

    /// Origin-centred `5 × 5` view at the given resolution.
    pub fn default_julia(width: u32, height: u32) -> Self {
        Self {
            center: Complex::ZERO,
            plane_width: Self::DEFAULT_EXTENT,
            plane_height: Self::DEFAULT_EXTENT,
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        self.center.re - self.plane_width / 2.0
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        self.center.re + self.plane_width / 2.0
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.center.im - self.plane_height / 2.0
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.center.im + self.plane_height / 2.0
    }

    /// Plane distance between horizontally adjacent samples.
    #[inline]
    pub fn step_x(&self) -> f64 {
        (self.x_max() - self.x_min()) / self.width as f64
    }

    /// Plane distance between vertically adjacent samples.
    #[inline]
    pub fn step_y(&self) -> f64 {
        (self.y_max() - self.y_min()) / self.height as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Move the centre (and with it every bound) by a plane-space offset.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.center.re += dx;
        self.center.im += dy;
    }

    /// Scale both extents by `factor`, keeping the centre fixed.
    ///
    /// Non-finite or non-positive factors are ignored; the resulting extents
    /// are clamped to `[MIN_PLANE_EXTENT, MAX_PLANE_EXTENT]` so the viewport
    /// can never degenerate.
    pub fn zoom(&mut self, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            debug!(factor, "Ignoring degenerate zoom factor");
            return;
        }
        self.plane_width = (self.plane_width * factor).clamp(MIN_PLANE_EXTENT, MAX_PLANE_EXTENT);
        self.plane_height =
            (self.plane_height * factor).clamp(MIN_PLANE_EXTENT, MAX_PLANE_EXTENT);
    }
}
