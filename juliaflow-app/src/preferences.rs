use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use juliaflow_render::RenderConfig;

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_true")]
    pub show_hud: bool,
    /// HUD panel background opacity 0.0..=1.0.
    #[serde(default = "default_hud_panel_opacity")]
    pub hud_panel_opacity: f32,
    /// Frame loop settings. Missing fields take their defaults.
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_window_width() -> f32 {
    1040.0
}
fn default_window_height() -> f32 {
    1080.0
}
fn default_true() -> bool {
    true
}
fn default_hud_panel_opacity() -> f32 {
    0.65
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            show_hud: true,
            hud_panel_opacity: default_hud_panel_opacity(),
            render: RenderConfig::default(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        let prefs = match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    prefs
                }
                Err(e) => {
                    error!("Failed to parse preferences: {e}");
                    return Self::default();
                }
            },
            Err(e) => {
                error!("Failed to read preferences file: {e}");
                return Self::default();
            }
        };

        // An invalid render section falls back alone; window settings are kept.
        if let Err(e) = prefs.render.validate() {
            warn!("Invalid render settings ({e}); using defaults");
            return Self {
                render: RenderConfig::default(),
                ..prefs
            };
        }
        prefs
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
