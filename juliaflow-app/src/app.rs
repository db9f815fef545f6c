use std::sync::mpsc;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{error, info, warn};

use juliaflow_core::{Complex, Viewport};
use juliaflow_render::{
    spawn_animation, AnimationHandle, AnimationState, Frame, FrameSink, InputEvent, Orchestrator,
};

use crate::preferences::AppPreferences;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// HUD box margin.
pub(crate) const HUD_MARGIN: f32 = 8.0;
/// HUD box corner radius.
pub(crate) const HUD_CORNER_RADIUS: f32 = 6.0;

/// Frames the animation thread may queue ahead of the UI. Further frames
/// are dropped until the UI catches up.
const FRAME_QUEUE_DEPTH: usize = 2;

// ---------------------------------------------------------------------------
// Frame delivery
// ---------------------------------------------------------------------------

/// Queues frames for the UI thread and wakes it up.
struct DisplaySink {
    tx: mpsc::SyncSender<Frame>,
    ctx: egui::Context,
}

impl FrameSink for DisplaySink {
    fn present(&mut self, frame: Frame) -> juliaflow_render::Result<()> {
        self.tx.present(frame)?;
        self.ctx.request_repaint();
        Ok(())
    }
}

/// What the HUD shows about the most recent frame.
pub(crate) struct FrameStats {
    pub number: u64,
    pub constant: Complex,
    pub viewport: Viewport,
    pub max_iterations: u32,
    pub elapsed: Duration,
    pub escaped: usize,
    /// Time since the previous frame reached the UI.
    pub interval: Option<Duration>,
    received_at: Instant,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

pub(crate) struct JuliaFlowApp {
    pub(crate) preferences: AppPreferences,

    animation: Option<AnimationHandle>,
    rx_frames: mpsc::Receiver<Frame>,
    texture: Option<egui::TextureHandle>,

    pub(crate) running: bool,
    pub(crate) auto: bool,
    pub(crate) backend_name: &'static str,
    pub(crate) stats: Option<FrameStats>,

    // Edit surface. Text is forwarded raw; parsing happens in the frame loop.
    pub(crate) c_real_text: String,
    pub(crate) c_imag_text: String,
    pub(crate) max_iter_text: String,
    /// A `c` field has focus, so frames must not overwrite it.
    pub(crate) editing_constant: bool,
}

impl JuliaFlowApp {
    pub(crate) fn new(
        ctx: &egui::Context,
        preferences: AppPreferences,
    ) -> juliaflow_render::Result<Self> {
        let config = preferences.render.clone();
        let orchestrator = Orchestrator::new(&config)?;
        let backend_name = orchestrator.backend_name();
        let params = *orchestrator.params();

        let (tx, rx_frames) = mpsc::sync_channel(FRAME_QUEUE_DEPTH);
        let sink = DisplaySink {
            tx,
            ctx: ctx.clone(),
        };
        let animation = spawn_animation(orchestrator, sink, config.frame_interval())?;
        animation.send(InputEvent::Redraw)?;

        info!(
            width = config.width,
            height = config.height,
            backend = backend_name,
            "Frame loop ready"
        );

        Ok(Self {
            preferences,
            animation: Some(animation),
            rx_frames,
            texture: None,
            running: false,
            auto: false,
            backend_name,
            stats: None,
            c_real_text: params.c.re.to_string(),
            c_imag_text: params.c.im.to_string(),
            max_iter_text: params.max_iterations.to_string(),
            editing_constant: false,
        })
    }

    pub(crate) fn state(&self) -> AnimationState {
        match (self.running, self.auto) {
            (false, _) => AnimationState::Idle,
            (true, false) => AnimationState::Running,
            (true, true) => AnimationState::RunningAuto,
        }
    }

    pub(crate) fn loop_alive(&self) -> bool {
        self.animation.is_some()
    }

    /// Resolution of the frames produced by the loop.
    pub(crate) fn frame_size(&self) -> egui::Vec2 {
        egui::vec2(
            self.preferences.render.width as f32,
            self.preferences.render.height as f32,
        )
    }

    /// Viewport of the last displayed frame, or the configured one.
    pub(crate) fn current_viewport(&self) -> Option<Viewport> {
        match &self.stats {
            Some(stats) => Some(stats.viewport),
            None => self.preferences.render.viewport().ok(),
        }
    }

    /// Forward an event to the frame loop. While stopped, events that change
    /// the picture are followed by a redraw.
    pub(crate) fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::ToggleAnimation => self.running = !self.running,
            InputEvent::ToggleAuto => self.auto = !self.auto,
            _ => {}
        }
        let redraw = !self.running && changes_picture(&event);

        let Some(animation) = &self.animation else {
            return;
        };
        let result = animation.send(event).and_then(|()| {
            if redraw {
                animation.send(InputEvent::Redraw)
            } else {
                Ok(())
            }
        });
        if let Err(e) = result {
            error!("{e}");
            self.animation = None;
        }
    }

    /// Upload the newest queued frame, discarding any older ones.
    fn poll_frames(&mut self, ctx: &egui::Context) {
        let mut latest = None;
        while let Ok(frame) = self.rx_frames.try_recv() {
            latest = Some(frame);
        }
        let Some(frame) = latest else {
            return;
        };

        let image = egui::ColorImage::from_rgb(
            [frame.buffer.width as usize, frame.buffer.height as usize],
            &frame.buffer.pixels,
        );
        self.texture = Some(ctx.load_texture("julia", image, egui::TextureOptions::LINEAR));

        if frame.state == AnimationState::RunningAuto && !self.editing_constant {
            self.c_real_text = frame.constant.re.to_string();
            self.c_imag_text = frame.constant.im.to_string();
        }

        let now = Instant::now();
        let interval = self.stats.as_ref().map(|s| now - s.received_at);
        self.stats = Some(FrameStats {
            number: frame.number,
            constant: frame.constant,
            viewport: frame.viewport,
            max_iterations: frame.max_iterations,
            elapsed: frame.elapsed,
            escaped: frame.escaped,
            interval,
            received_at: now,
        });
    }

    fn check_loop(&mut self) {
        if self.animation.as_ref().is_some_and(AnimationHandle::is_finished) {
            warn!("Frame loop exited unexpectedly");
            self.animation = None;
        }
    }
}

fn changes_picture(event: &InputEvent) -> bool {
    matches!(
        event,
        InputEvent::PrimaryClick { .. }
            | InputEvent::Scroll(_)
            | InputEvent::SetConstant { .. }
            | InputEvent::SetMaxIterations(_)
    )
}

impl eframe::App for JuliaFlowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.check_loop();
        self.poll_frames(ctx);
        self.handle_keyboard(ctx);
        self.show_toolbar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (response, painter) =
                    ui.allocate_painter(available, egui::Sense::click_and_drag());

                let image_rect = crate::input::fit_rect(response.rect, self.frame_size());
                if let Some(ref tex) = self.texture {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(tex.id(), image_rect, uv, egui::Color32::WHITE);
                }

                self.handle_canvas_input(ctx, &response, image_rect);
            });

        self.show_hud(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(animation) = self.animation.take() {
            animation.shutdown();
        }
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}
