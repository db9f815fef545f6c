use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid {field}: {value} (must be positive and finite)")]
    InvalidSetting { field: &'static str, value: f64 },

    #[error("failed to build kernel thread pool: {0}")]
    ThreadPool(String),

    #[error("failed to spawn animation worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("display closed")]
    DisplayClosed,

    #[error("animation loop is not running")]
    LoopStopped,

    #[error(transparent)]
    Core(#[from] juliaflow_core::CoreError),
}
