mod app;
mod app_dir;
mod input;
mod preferences;
mod ui;

use eframe::egui;
use tracing::info;

use app::JuliaFlowApp;
use preferences::AppPreferences;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting JuliaFlow");

    let prefs = AppPreferences::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("JuliaFlow")
            .with_inner_size([prefs.window_width, prefs.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "JuliaFlow",
        options,
        Box::new(move |cc| {
            egui_material_icons::initialize(&cc.egui_ctx);
            Ok(Box::new(JuliaFlowApp::new(&cc.egui_ctx, prefs)?))
        }),
    )
}
