pub mod animation;
pub mod backend;
pub mod buffer;
pub mod config;
pub mod error;
pub mod iteration_buffer;
pub mod orchestrator;
pub mod palette;
pub mod renderer;

pub use animation::{spawn_animation, AnimationHandle, FrameSink};
pub use backend::{Backend, KernelBackend, ParallelBackend, SequentialBackend};
pub use buffer::FrameBuffer;
pub use config::RenderConfig;
pub use error::RenderError;
pub use iteration_buffer::IterationBuffer;
pub use orchestrator::{AnimationState, Frame, InputEvent, MovementVector, Orchestrator};
pub use palette::{ChannelOverflow, Palette};
pub use renderer::{render, render_frame, RenderResult};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
