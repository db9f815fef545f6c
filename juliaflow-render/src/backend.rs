use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{info, warn};

use juliaflow_core::{escape_time, FractalParameters, PixelResult, SampleGrid};

use crate::error::RenderError;

/// Rows evaluated together as one unit of parallel work.
pub const ROWS_PER_CHUNK: usize = 4;

/// Something that can run the escape-time kernel over a whole sample grid.
///
/// Every implementation must return exactly one result per sample, in the
/// grid's row-major order. Samples are independent, so backends are free to
/// evaluate them in any order or concurrently.
pub trait KernelBackend: Send {
    fn name(&self) -> &'static str;

    fn evaluate(&self, grid: &SampleGrid, params: &FractalParameters) -> Vec<PixelResult>;
}

// ---------------------------------------------------------------------------
// Sequential
// ---------------------------------------------------------------------------

/// Evaluates every sample on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBackend;

impl KernelBackend for SequentialBackend {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn evaluate(&self, grid: &SampleGrid, params: &FractalParameters) -> Vec<PixelResult> {
        grid.points()
            .iter()
            .map(|&z| escape_time(z, params))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Parallel
// ---------------------------------------------------------------------------

/// Splits the grid into row bands and evaluates them on a dedicated Rayon pool.
///
/// Results are written straight into their final slots so the output keeps
/// row-major order without a gather step.
pub struct ParallelBackend {
    pool: ThreadPool,
}

impl ParallelBackend {
    /// Build a pool with `threads` workers; `0` lets Rayon pick.
    pub fn new(threads: usize) -> crate::Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("julia-kernel-{i}"))
            .build()
            .map_err(|e| RenderError::ThreadPool(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl std::fmt::Debug for ParallelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelBackend")
            .field("threads", &self.threads())
            .finish()
    }
}

impl KernelBackend for ParallelBackend {
    fn name(&self) -> &'static str {
        "rayon"
    }

    fn evaluate(&self, grid: &SampleGrid, params: &FractalParameters) -> Vec<PixelResult> {
        let chunk_len = (grid.width() as usize * ROWS_PER_CHUNK).max(1);
        let mut results = vec![PixelResult::Bounded; grid.len()];
        self.pool.install(|| {
            results
                .par_chunks_mut(chunk_len)
                .zip(grid.points().par_chunks(chunk_len))
                .for_each(|(out, samples)| {
                    for (slot, &z) in out.iter_mut().zip(samples) {
                        *slot = escape_time(z, params);
                    }
                });
        });
        results
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The backend chosen at startup.
#[derive(Debug)]
pub enum Backend {
    Parallel(ParallelBackend),
    Sequential(SequentialBackend),
}

impl Backend {
    /// Prefer the parallel backend; fall back to sequential if its pool
    /// cannot be built.
    pub fn with_threads(threads: usize) -> Self {
        match ParallelBackend::new(threads) {
            Ok(parallel) => {
                info!(threads = parallel.threads(), "Using parallel kernel backend");
                Self::Parallel(parallel)
            }
            Err(e) => {
                warn!("{e}; falling back to sequential kernel backend");
                Self::Sequential(SequentialBackend)
            }
        }
    }

    pub fn sequential() -> Self {
        Self::Sequential(SequentialBackend)
    }
}

impl KernelBackend for Backend {
    fn name(&self) -> &'static str {
        match self {
            Self::Parallel(b) => b.name(),
            Self::Sequential(b) => b.name(),
        }
    }

    fn evaluate(&self, grid: &SampleGrid, params: &FractalParameters) -> Vec<PixelResult> {
        match self {
            Self::Parallel(b) => b.evaluate(grid, params),
            Self::Sequential(b) => b.evaluate(grid, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juliaflow_core::{Complex, Viewport};

    fn grid(width: u32, height: u32) -> SampleGrid {
        SampleGrid::map(&Viewport::new(Complex::ZERO, 3.2, 2.4, width, height).unwrap())
    }

    fn params() -> FractalParameters {
        FractalParameters::new(Complex::new(-0.8, 0.156), 200, 4.0).unwrap()
    }

    #[test]
    fn parallel_matches_sequential() {
        let g = grid(97, 61);
        let parallel = ParallelBackend::new(4).unwrap();
        let expected = SequentialBackend.evaluate(&g, &params());
        let actual = parallel.evaluate(&g, &params());
        assert_eq!(actual.len(), 97 * 61);
        assert_eq!(actual, expected);
    }

    #[test]
    fn single_thread_pool_works() {
        let g = grid(16, 16);
        let parallel = ParallelBackend::new(1).unwrap();
        assert_eq!(parallel.threads(), 1);
        assert_eq!(
            parallel.evaluate(&g, &params()),
            SequentialBackend.evaluate(&g, &params())
        );
    }

    #[test]
    fn backend_enum_dispatches() {
        let g = grid(8, 8);
        let seq = Backend::sequential();
        assert_eq!(seq.name(), "sequential");
        let par = Backend::with_threads(2);
        assert_eq!(par.evaluate(&g, &params()), seq.evaluate(&g, &params()));
    }

    #[test]
    fn one_pixel_grid() {
        let g = grid(1, 1);
        let out = ParallelBackend::new(2).unwrap().evaluate(&g, &params());
        assert_eq!(out.len(), 1);
    }
}
