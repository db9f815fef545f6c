use std::ops::AddAssign;
use std::time::Duration;

use tracing::{debug, info, warn};

use juliaflow_core::{Complex, FractalParameters, Viewport};

use crate::backend::{Backend, KernelBackend};
use crate::buffer::FrameBuffer;
use crate::config::RenderConfig;
use crate::palette::Palette;
use crate::renderer::render;

/// Bounds on the factor a single scroll event may scale the extents by.
pub const MIN_ZOOM_FACTOR: f64 = 0.01;
pub const MAX_ZOOM_FACTOR: f64 = 100.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Plane-space offset applied to the viewport centre on every running tick.
///
/// It persists across ticks until explicitly zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementVector {
    pub dx: f64,
    pub dy: f64,
}

impl MovementVector {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl AddAssign for MovementVector {
    fn add_assign(&mut self, rhs: Self) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    /// Running with `c` drifting every tick.
    RunningAuto,
}

impl AnimationState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::RunningAuto => "Running (auto)",
        }
    }
}

/// Discrete input delivered by the UI shell.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary click at pixel `(x, y)` of the frame: jump towards it and
    /// add to the movement vector.
    PrimaryClick { x: f64, y: f64 },
    /// Secondary click: zero the movement vector.
    SecondaryClick,
    /// Wheel delta; positive values widen the view.
    Scroll(f64),
    /// Add a plane-space offset to the movement vector.
    Drift { dx: f64, dy: f64 },
    ToggleAnimation,
    ToggleAuto,
    /// Raw text of the two `c` components.
    SetConstant { real: String, imaginary: String },
    /// Raw text of the iteration budget.
    SetMaxIterations(String),
    /// Render one frame on the next tick even when idle.
    Redraw,
}

/// One rendered frame plus the state it was rendered from.
#[derive(Debug, Clone)]
pub struct Frame {
    /// 1-based sequence number.
    pub number: u64,
    pub buffer: FrameBuffer,
    /// The constant used, so edit fields can follow auto-drift.
    pub constant: Complex,
    pub viewport: Viewport,
    pub max_iterations: u32,
    pub state: AnimationState,
    pub elapsed: Duration,
    pub escaped: usize,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Owns the viewport and fractal state and turns it into frames.
///
/// All mutation goes through [`apply`](Self::apply) and [`tick`](Self::tick),
/// both taking `&mut self`, so a tick can never observe a half-applied edit.
#[derive(Debug)]
pub struct Orchestrator {
    viewport: Viewport,
    params: FractalParameters,
    movement: MovementVector,
    running: bool,
    auto: bool,
    redraw_pending: bool,
    frames: u64,

    auto_drift_step: f64,
    pan_jump_divisor: f64,
    pan_drift_divisor: f64,
    zoom_divisor: f64,

    backend: Backend,
    palette: Palette,
}

impl Orchestrator {
    /// Validate `config` and build an orchestrator with the configured backend.
    pub fn new(config: &RenderConfig) -> crate::Result<Self> {
        config.validate()?;
        Self::with_backend(config, Backend::with_threads(config.threads))
    }

    pub fn with_backend(config: &RenderConfig, backend: Backend) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            viewport: config.viewport()?,
            params: config.parameters()?,
            movement: MovementVector::ZERO,
            running: false,
            auto: false,
            redraw_pending: false,
            frames: 0,
            auto_drift_step: config.auto_drift_step,
            pan_jump_divisor: config.pan_jump_divisor,
            pan_drift_divisor: config.pan_drift_divisor,
            zoom_divisor: config.zoom_divisor,
            backend,
            palette: config.palette(),
        })
    }

    // -- Accessors ----------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn params(&self) -> &FractalParameters {
        &self.params
    }

    pub fn movement(&self) -> MovementVector {
        self.movement
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn state(&self) -> AnimationState {
        match (self.running, self.auto) {
            (false, _) => AnimationState::Idle,
            (true, false) => AnimationState::Running,
            (true, true) => AnimationState::RunningAuto,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Whether the next [`tick`](Self::tick) will produce a frame.
    pub fn wants_tick(&self) -> bool {
        self.running || self.redraw_pending
    }

    // -- Input --------------------------------------------------------------

    pub fn apply(&mut self, event: InputEvent) {
        debug!(?event, "Applying input");
        match event {
            InputEvent::PrimaryClick { x, y } => self.pan(x, y),
            InputEvent::SecondaryClick => self.stop_movement(),
            InputEvent::Scroll(delta) => self.zoom(delta),
            InputEvent::Drift { dx, dy } => self.movement += MovementVector::new(dx, dy),
            InputEvent::ToggleAnimation => self.toggle_animation(),
            InputEvent::ToggleAuto => self.toggle_auto(),
            InputEvent::SetConstant { real, imaginary } => self.set_constant(&real, &imaginary),
            InputEvent::SetMaxIterations(text) => self.set_max_iterations(&text),
            InputEvent::Redraw => self.redraw_pending = true,
        }
    }

    pub fn toggle_animation(&mut self) {
        self.running = !self.running;
        info!(state = self.state().label(), "Animation toggled");
    }

    pub fn toggle_auto(&mut self) {
        self.auto = !self.auto;
        info!(auto = self.auto, "Auto-drift toggled");
    }

    /// Jump towards pixel `(x, y)` and add a smaller share of the same
    /// offset to the movement vector, so the view keeps drifting that way.
    pub fn pan(&mut self, x: f64, y: f64) {
        let offset_x = x - self.viewport.width as f64 / 2.0;
        let offset_y = y - self.viewport.height as f64 / 2.0;
        let (w, h) = (self.viewport.plane_width, self.viewport.plane_height);

        self.viewport.translate(
            offset_x * w / self.pan_jump_divisor,
            offset_y * h / self.pan_jump_divisor,
        );
        self.movement += MovementVector::new(
            offset_x * w / self.pan_drift_divisor,
            offset_y * h / self.pan_drift_divisor,
        );
    }

    /// Zero the movement vector. Zoom and animation are unaffected.
    pub fn stop_movement(&mut self) {
        self.movement = MovementVector::ZERO;
    }

    /// Scale both extents by `1 + delta / zoom_divisor`, clamped.
    pub fn zoom(&mut self, delta: f64) {
        let factor = (1.0 + delta / self.zoom_divisor).clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR);
        self.viewport.zoom(factor);
    }

    /// Replace `c` from raw text; a malformed component becomes `0`.
    pub fn set_constant(&mut self, real: &str, imaginary: &str) {
        self.params.c = Complex::new(
            parse_component(real, "real"),
            parse_component(imaginary, "imaginary"),
        );
    }

    /// Replace the iteration budget from raw text; malformed input is ignored.
    pub fn set_max_iterations(&mut self, text: &str) {
        match text.trim().parse::<u32>() {
            Ok(n) if n >= 1 => self.params.max_iterations = n,
            _ => warn!(
                input = text,
                kept = self.params.max_iterations,
                "Ignoring malformed iteration budget"
            ),
        }
    }

    // -- Ticking ------------------------------------------------------------

    /// Per-tick state update: auto-drift, then the movement vector.
    fn advance(&mut self) {
        if self.auto {
            self.params.c.im -= self.auto_drift_step;
        }
        self.viewport.translate(self.movement.dx, self.movement.dy);
    }

    /// Advance state (when running) and render one frame.
    ///
    /// Returns `None` when idle with no redraw requested. A redraw while
    /// idle renders the current state without advancing it.
    pub fn tick(&mut self) -> Option<Frame> {
        if self.running {
            self.advance();
        } else if !self.redraw_pending {
            return None;
        }
        self.redraw_pending = false;

        let result = render(&self.viewport, &self.params, &self.backend);
        let escaped = result.iterations.escaped_count();
        let buffer = self.palette.colorize(&result.iterations);
        self.frames += 1;

        debug!(
            frame = self.frames,
            elapsed_ms = result.elapsed.as_millis(),
            escaped,
            "Frame ready"
        );

        Some(Frame {
            number: self.frames,
            buffer,
            constant: self.params.c,
            viewport: self.viewport,
            max_iterations: self.params.max_iterations,
            state: self.state(),
            elapsed: result.elapsed,
            escaped,
        })
    }
}

fn parse_component(text: &str, component: &'static str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(input = text, component, "Malformed constant component; using 0");
            0.0
        }
    }
}
