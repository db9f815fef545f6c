use eframe::egui;

use juliaflow_render::AnimationState;

use crate::app::{JuliaFlowApp, HUD_CORNER_RADIUS, HUD_MARGIN};

impl JuliaFlowApp {
    pub(crate) fn show_hud(&self, ctx: &egui::Context) {
        if !self.preferences.show_hud {
            return;
        }

        let hud_alpha =
            (self.preferences.hud_panel_opacity.clamp(0.0, 1.0) * 255.0).round() as u8;

        egui::Area::new(egui::Id::new("hud_frame"))
            .anchor(egui::Align2::LEFT_BOTTOM, [HUD_MARGIN, -HUD_MARGIN])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(hud_alpha))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));
                        ui.style_mut().spacing.item_spacing.y = 2.0;

                        if !self.loop_alive() {
                            ui.colored_label(egui::Color32::from_rgb(255, 100, 100), "Frame loop stopped");
                        }
                        let state = self.state();
                        let state_color = match state {
                            AnimationState::Idle => egui::Color32::GRAY,
                            AnimationState::Running => egui::Color32::from_rgb(100, 255, 100),
                            AnimationState::RunningAuto => egui::Color32::YELLOW,
                        };
                        ui.colored_label(state_color, state.label());

                        let Some(stats) = &self.stats else {
                            ui.label("Waiting for first frame\u{2026}");
                            return;
                        };
                        let vp = &stats.viewport;

                        ui.label(format!("Frame {}", stats.number));
                        ui.label(format!(
                            "c: {:.6} {:+.6}i",
                            stats.constant.re, stats.constant.im
                        ));
                        ui.label(format!(
                            "Center: {:.10} {:+.10}i",
                            vp.center.re, vp.center.im
                        ));
                        ui.label(format!(
                            "Extent: {:.3e} \u{00d7} {:.3e}",
                            vp.plane_width, vp.plane_height
                        ));
                        ui.label(format!("Iterations: {}", stats.max_iterations));

                        let escaped_pct =
                            stats.escaped as f64 / vp.pixel_count().max(1) as f64 * 100.0;
                        ui.label(format!("Escaped: {escaped_pct:.1}%"));

                        ui.label(format!(
                            "{:.1} ms ({})",
                            stats.elapsed.as_secs_f64() * 1000.0,
                            self.backend_name
                        ));
                        if let Some(interval) = stats.interval {
                            let secs = interval.as_secs_f64();
                            if secs > 0.0 && state != AnimationState::Idle {
                                ui.label(format!("{:.1} fps", 1.0 / secs));
                            }
                        }
                    });
            });
    }
}
