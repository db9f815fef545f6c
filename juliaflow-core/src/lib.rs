pub mod complex;
pub mod error;
pub mod grid;
pub mod julia;
pub mod params;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use grid::SampleGrid;
pub use julia::{escape_time, Julia, PixelResult};
pub use params::FractalParameters;
pub use viewport::{Viewport, MAX_PLANE_EXTENT, MIN_PLANE_EXTENT};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
