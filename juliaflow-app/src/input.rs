use eframe::egui;

use juliaflow_core::Viewport;
use juliaflow_render::InputEvent;

use crate::app::JuliaFlowApp;

/// Largest rectangle of `size`'s aspect ratio that fits centred in `outer`.
pub(crate) fn fit_rect(outer: egui::Rect, size: egui::Vec2) -> egui::Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return outer;
    }
    let scale = (outer.width() / size.x).min(outer.height() / size.y);
    egui::Rect::from_center_size(outer.center(), size * scale)
}

/// Screen position to frame pixel coordinates, or `None` outside the image.
pub(crate) fn to_frame_pixel(
    pos: egui::Pos2,
    image_rect: egui::Rect,
    size: egui::Vec2,
) -> Option<(f64, f64)> {
    if !image_rect.contains(pos) || image_rect.width() <= 0.0 || image_rect.height() <= 0.0 {
        return None;
    }
    let x = (pos.x - image_rect.min.x) / image_rect.width() * size.x;
    let y = (pos.y - image_rect.min.y) / image_rect.height() * size.y;
    Some((x as f64, y as f64))
}

/// Plane-space drift for a drag of `delta` screen points.
///
/// Uses the same scaling as the drift part of a click, so a drag of `n`
/// frame pixels adds what a click `n` pixels from the centre would.
pub(crate) fn drag_to_drift(
    delta: egui::Vec2,
    image_rect: egui::Rect,
    size: egui::Vec2,
    viewport: &Viewport,
    drift_divisor: f64,
) -> (f64, f64) {
    if image_rect.width() <= 0.0 || image_rect.height() <= 0.0 {
        return (0.0, 0.0);
    }
    let px = (delta.x / image_rect.width() * size.x) as f64;
    let py = (delta.y / image_rect.height() * size.y) as f64;
    (
        px * viewport.plane_width / drift_divisor,
        py * viewport.plane_height / drift_divisor,
    )
}

impl JuliaFlowApp {
    pub(crate) fn handle_canvas_input(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        image_rect: egui::Rect,
    ) {
        let size = self.frame_size();

        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_y.abs() > 0.0 && response.hovered() {
            self.dispatch(InputEvent::Scroll(scroll_y as f64));
        }

        if response.clicked() {
            if let Some((x, y)) = response
                .interact_pointer_pos()
                .and_then(|pos| to_frame_pixel(pos, image_rect, size))
            {
                self.dispatch(InputEvent::PrimaryClick { x, y });
            }
        }
        if response.secondary_clicked() {
            self.dispatch(InputEvent::SecondaryClick);
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            if delta != egui::Vec2::ZERO {
                if let Some(viewport) = self.current_viewport() {
                    let (dx, dy) = drag_to_drift(
                        delta,
                        image_rect,
                        size,
                        &viewport,
                        self.preferences.render.pan_drift_divisor,
                    );
                    self.dispatch(InputEvent::Drift { dx, dy });
                }
            }
        }
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let text_editing = ctx.memory(|m| m.focused().is_some());
        if text_editing {
            return;
        }

        let (toggle, auto, stop, hud) = ctx.input(|input| {
            (
                input.key_pressed(egui::Key::Space),
                input.key_pressed(egui::Key::A),
                input.key_pressed(egui::Key::Escape),
                input.key_pressed(egui::Key::H),
            )
        });
        if toggle {
            self.dispatch(InputEvent::ToggleAnimation);
        }
        if auto {
            self.dispatch(InputEvent::ToggleAuto);
        }
        if stop {
            self.dispatch(InputEvent::SecondaryClick);
        }
        if hud {
            self.preferences.show_hud = !self.preferences.show_hud;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juliaflow_core::Complex;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, h))
    }

    #[test]
    fn fit_letterboxes_wide_area() {
        let fitted = fit_rect(rect(0.0, 0.0, 800.0, 400.0), egui::vec2(1000.0, 1000.0));
        assert_eq!(fitted, rect(200.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn fit_pillarboxes_tall_area() {
        let fitted = fit_rect(rect(0.0, 0.0, 300.0, 600.0), egui::vec2(100.0, 50.0));
        assert_eq!(fitted, rect(0.0, 225.0, 300.0, 150.0));
    }

    #[test]
    fn pixel_mapping_scales_to_frame() {
        let image = rect(200.0, 0.0, 400.0, 400.0);
        let size = egui::vec2(1000.0, 1000.0);
        assert_eq!(
            to_frame_pixel(egui::pos2(400.0, 200.0), image, size),
            Some((500.0, 500.0))
        );
        assert_eq!(
            to_frame_pixel(egui::pos2(200.0, 0.0), image, size),
            Some((0.0, 0.0))
        );
        assert_eq!(to_frame_pixel(egui::pos2(100.0, 200.0), image, size), None);
    }

    #[test]
    fn drag_drift_matches_click_scaling() {
        let image = rect(0.0, 0.0, 500.0, 500.0);
        let size = egui::vec2(1000.0, 1000.0);
        let viewport = Viewport::new(Complex::ZERO, 5.0, 2.5, 1000, 1000).unwrap();

        // 10 screen points are 20 frame pixels here.
        let (dx, dy) = drag_to_drift(egui::vec2(10.0, -10.0), image, size, &viewport, 1e6);
        assert!((dx - 20.0 * 5.0 / 1e6).abs() < 1e-15);
        assert!((dy + 20.0 * 2.5 / 1e6).abs() < 1e-15);
    }
}
