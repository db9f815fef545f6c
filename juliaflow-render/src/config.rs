use std::time::Duration;

use serde::{Deserialize, Serialize};

use juliaflow_core::{Complex, FractalParameters, Viewport};

use crate::error::RenderError;
use crate::palette::{ChannelOverflow, Palette};

/// Everything the frame loop needs at construction time.
///
/// Missing fields deserialize to their defaults so a partial JSON object is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame resolution in pixels.
    pub width: u32,
    pub height: u32,

    /// Initial constant `c`.
    pub c_real: f64,
    pub c_imaginary: f64,

    /// Initial viewport.
    pub center_x: f64,
    pub center_y: f64,
    pub plane_width: f64,
    pub plane_height: f64,

    pub max_iterations: u32,
    pub escape_radius_squared: f64,

    /// Amount subtracted from the imaginary part of `c` per tick in auto mode.
    pub auto_drift_step: f64,

    /// A click jumps the centre by `offset · extent / pan_jump_divisor`.
    pub pan_jump_divisor: f64,
    /// ...and adds `offset · extent / pan_drift_divisor` to the movement vector.
    pub pan_drift_divisor: f64,
    /// A scroll of `delta` scales the extents by `1 + delta / zoom_divisor`.
    pub zoom_divisor: f64,

    /// Pause between animation ticks.
    pub frame_interval_ms: u64,

    /// Kernel worker threads; `0` uses one per logical core.
    pub threads: usize,

    pub channel_overflow: ChannelOverflow,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            c_real: FractalParameters::DEFAULT_C.re,
            c_imaginary: FractalParameters::DEFAULT_C.im,
            center_x: 0.0,
            center_y: 0.0,
            plane_width: Viewport::DEFAULT_EXTENT,
            plane_height: Viewport::DEFAULT_EXTENT,
            max_iterations: FractalParameters::DEFAULT_MAX_ITERATIONS,
            escape_radius_squared: FractalParameters::DEFAULT_ESCAPE_RADIUS_SQ,
            auto_drift_step: 0.0001,
            pan_jump_divisor: 10_000.0,
            pan_drift_divisor: 1_000_000.0,
            zoom_divisor: 1000.0,
            frame_interval_ms: 1,
            threads: 0,
            channel_overflow: ChannelOverflow::Clamp,
        }
    }
}

impl RenderConfig {
    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.viewport()?;
        self.parameters()?;
        for (name, divisor) in [
            ("pan_jump_divisor", self.pan_jump_divisor),
            ("pan_drift_divisor", self.pan_drift_divisor),
            ("zoom_divisor", self.zoom_divisor),
        ] {
            if divisor <= 0.0 || !divisor.is_finite() {
                return Err(RenderError::InvalidSetting {
                    field: name,
                    value: divisor,
                });
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> crate::Result<Viewport> {
        Ok(Viewport::new(
            Complex::new(self.center_x, self.center_y),
            self.plane_width,
            self.plane_height,
            self.width,
            self.height,
        )?)
    }

    pub fn parameters(&self) -> crate::Result<FractalParameters> {
        Ok(FractalParameters::new(
            Complex::new(self.c_real, self.c_imaginary),
            self.max_iterations,
            self.escape_radius_squared,
        )?)
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.channel_overflow)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RenderConfig::default();
        config.validate().unwrap();
        let vp = config.viewport().unwrap();
        assert_eq!((vp.width, vp.height), (1000, 1000));
        assert_eq!(vp.plane_width, 5.0);
        let params = config.parameters().unwrap();
        assert_eq!(params.c, Complex::new(0.36, 0.36));
        assert_eq!(params.max_iterations, 10_000);
        assert_eq!(params.escape_radius_sq, 4.0);
        assert_eq!(config.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn rejects_zero_resolution() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RenderError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn rejects_bad_fields() {
        let bad = [
            RenderConfig {
                plane_width: 0.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                max_iterations: 0,
                ..RenderConfig::default()
            },
            RenderConfig {
                escape_radius_squared: -1.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                zoom_divisor: 0.0,
                ..RenderConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "width": 320, "channel_overflow": "wrap" }"#).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 1000);
        assert_eq!(config.channel_overflow, ChannelOverflow::Wrap);
        assert_eq!(config.auto_drift_step, 0.0001);
    }
}
