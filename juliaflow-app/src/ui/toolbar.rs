use eframe::egui;

use juliaflow_render::InputEvent;

use crate::app::JuliaFlowApp;

const FIELD_WIDTH: f32 = 120.0;

impl JuliaFlowApp {
    pub(crate) fn show_toolbar(&mut self, ctx: &egui::Context) {
        use egui_material_icons::icons::*;

        let icon_on = egui::Color32::from_rgb(200, 200, 200);
        let icon_off = egui::Color32::from_rgb(90, 90, 90);
        let mi_state = |icon: &str, text: &str, active: bool| {
            egui::RichText::new(format!("{icon} {text}"))
                .color(if active { icon_on } else { icon_off })
        };

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_enabled_ui(self.loop_alive(), |ui| {
                ui.horizontal(|ui| {
                    let (icon, label) = if self.running {
                        (ICON_PAUSE, "Stop")
                    } else {
                        (ICON_PLAY_ARROW, "Start")
                    };
                    if ui
                        .button(format!("{icon} {label}"))
                        .on_hover_text("Start or stop the animation (Space)")
                        .clicked()
                    {
                        self.dispatch(InputEvent::ToggleAnimation);
                    }
                    if ui
                        .button(mi_state(ICON_AUTORENEW, "Auto", self.auto))
                        .on_hover_text("Drift the imaginary part of c every frame (A)")
                        .clicked()
                    {
                        self.dispatch(InputEvent::ToggleAuto);
                    }

                    ui.separator();
                    ui.label("c =");
                    let re = ui.add(
                        egui::TextEdit::singleline(&mut self.c_real_text)
                            .desired_width(FIELD_WIDTH),
                    );
                    ui.label("+");
                    let im = ui.add(
                        egui::TextEdit::singleline(&mut self.c_imag_text)
                            .desired_width(FIELD_WIDTH),
                    );
                    ui.label("i");
                    self.editing_constant = re.has_focus() || im.has_focus();
                    if re.changed() || im.changed() {
                        self.dispatch(InputEvent::SetConstant {
                            real: self.c_real_text.clone(),
                            imaginary: self.c_imag_text.clone(),
                        });
                    }

                    ui.separator();
                    ui.label("Iterations");
                    let iterations = ui.add(
                        egui::TextEdit::singleline(&mut self.max_iter_text).desired_width(70.0),
                    );
                    if iterations.changed() {
                        self.dispatch(InputEvent::SetMaxIterations(self.max_iter_text.clone()));
                    }

                    ui.separator();
                    if ui
                        .button(format!("{ICON_PAN_TOOL} Stop movement"))
                        .on_hover_text("Cancel drift from clicks and drags (Esc, right click)")
                        .clicked()
                    {
                        self.dispatch(InputEvent::SecondaryClick);
                    }
                    if ui
                        .button(mi_state(ICON_INFO, "HUD", self.preferences.show_hud))
                        .on_hover_text("Show frame statistics (H)")
                        .clicked()
                    {
                        self.preferences.show_hud = !self.preferences.show_hud;
                    }
                });
            });
        });
    }
}
