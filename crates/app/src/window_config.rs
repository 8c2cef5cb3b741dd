//! Window configuration for the desktop app.

use app::APP_NAME;
use app::settings::{Settings, resolve_ui_scale};
use macroquad::window::{Conf, screen_dpi_scale};

const MIN_WINDOW_WIDTH: i32 = 640;
const MIN_WINDOW_HEIGHT: i32 = 480;

pub fn build_window_conf(settings: &Settings) -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: settings.window_width.max(MIN_WINDOW_WIDTH),
        window_height: settings.window_height.max(MIN_WINDOW_HEIGHT),
        // Request a high-DPI framebuffer so text and HUD size track display scale.
        high_dpi: true,
        ..Default::default()
    }
}

pub fn runtime_ui_scale(settings: &Settings) -> f32 {
    resolve_ui_scale(screen_dpi_scale(), settings.ui_scale)
}
