mod hud;
mod toolbar;
