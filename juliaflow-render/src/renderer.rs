use std::time::{Duration, Instant};

use tracing::debug;

use juliaflow_core::{FractalParameters, SampleGrid, Viewport};

use crate::backend::KernelBackend;
use crate::buffer::FrameBuffer;
use crate::iteration_buffer::IterationBuffer;
use crate::palette::Palette;

/// Raw kernel output for one frame plus timing.
///
/// Contains no color; apply a [`Palette`] to get displayable pixels.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub iterations: IterationBuffer,
    pub elapsed: Duration,
}

/// Map the viewport to samples and run the kernel over all of them.
///
/// The sample grid lives only for the duration of this call.
pub fn render<B: KernelBackend + ?Sized>(
    viewport: &Viewport,
    params: &FractalParameters,
    backend: &B,
) -> RenderResult {
    let start = Instant::now();

    let grid = SampleGrid::map(viewport);
    let data = backend.evaluate(&grid, params);
    let iterations = IterationBuffer::new(
        viewport.width,
        viewport.height,
        params.max_iterations,
        data,
    );

    let elapsed = start.elapsed();
    debug!(
        backend = backend.name(),
        width = viewport.width,
        height = viewport.height,
        max_iter = params.max_iterations,
        elapsed_ms = elapsed.as_millis(),
        "Kernel pass complete"
    );

    RenderResult {
        iterations,
        elapsed,
    }
}

/// Mapper → kernel → colorizer in one call.
pub fn render_frame<B: KernelBackend + ?Sized>(
    viewport: &Viewport,
    params: &FractalParameters,
    backend: &B,
    palette: &Palette,
) -> FrameBuffer {
    let result = render(viewport, params, backend);
    palette.colorize(&result.iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ParallelBackend, SequentialBackend};
    use juliaflow_core::{Complex, PixelResult};

    #[test]
    fn basic_render_produces_iteration_data() {
        let viewport = Viewport::default_julia(64, 48);
        let params = FractalParameters::default().with_max_iterations(100);

        let result = render(&viewport, &params, &SequentialBackend);

        assert_eq!(result.iterations.data.len(), 64 * 48);
        assert_eq!(result.iterations.width, 64);
        assert_eq!(result.iterations.max_iterations, 100);
    }

    #[test]
    fn origin_pixel_of_zero_c_is_black() {
        // Samples at −2, −1, 0, 1 on each axis, so pixel (2, 2) is exactly 0 + 0i.
        let viewport = Viewport::new(Complex::ZERO, 4.0, 4.0, 4, 4).unwrap();
        let params = FractalParameters::new(Complex::ZERO, 64, 4.0).unwrap();

        let result = render(&viewport, &params, &SequentialBackend);
        assert_eq!(result.iterations.get(2, 2), Some(PixelResult::Bounded));

        let frame = render_frame(&viewport, &params, &SequentialBackend, &Palette::default());
        assert_eq!(frame.pixel(2, 2), Some([0, 0, 0]));
    }

    #[test]
    fn backends_render_identical_frames() {
        let viewport = Viewport::default_julia(40, 30);
        let params = FractalParameters::default().with_max_iterations(150);
        let palette = Palette::default();
        let parallel = ParallelBackend::new(3).unwrap();

        let a = render_frame(&viewport, &params, &SequentialBackend, &palette);
        let b = render_frame(&viewport, &params, &parallel, &palette);
        assert_eq!(a, b);
    }
}
