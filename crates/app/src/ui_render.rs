//! Draws the software-rendered viewport and the HUD panels.

use crate::game_layout::{FrameLayout, PanelRect};
use crate::ui_text::{
    ability_lines, event_log_line, progress_lines, recap_lines, status_text, vitals_lines,
};
use app::app_loop::{AppMode, AppState};
use delve_core::{Game, RunOutcome, Surface};
use macroquad::prelude::*;

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 12.0;
const PANEL_PAD_Y: f32 = 22.0;
const LINE_STEP: f32 = 18.0;
const FONT_SIZE: f32 = 18.0;
const BAR_HEIGHT: f32 = 8.0;
const EVENT_LOG_LINES: usize = 14;
const HEALTH_COLOR: Color = Color { r: 0.8, g: 0.15, b: 0.15, a: 1.0 };
const MANA_COLOR: Color = Color { r: 0.2, g: 0.35, b: 0.9, a: 1.0 };

/// GPU copy of the core's pixel surface, recreated when the size changes.
#[derive(Default)]
pub struct ViewportTexture {
    texture: Option<Texture2D>,
    size: (u32, u32),
}

impl ViewportTexture {
    fn upload(&mut self, surface: &Surface) -> Option<&Texture2D> {
        if surface.is_empty() {
            return None;
        }
        let (width, height) = (surface.width(), surface.height());
        let bytes = surface.as_bytes();
        match &self.texture {
            Some(texture) if self.size == (width, height) => {
                texture.update(&Image { bytes, width: width as u16, height: height as u16 });
            }
            _ => {
                let texture = Texture2D::from_rgba8(width as u16, height as u16, &bytes);
                texture.set_filter(FilterMode::Nearest);
                self.texture = Some(texture);
                self.size = (width, height);
            }
        }
        self.texture.as_ref()
    }
}

/// Surface resolution for a viewport panel: half the panel's pixels, at
/// least one pixel each way.
pub fn surface_size_for(panel: PanelRect) -> (u32, u32) {
    let width = (panel.width / 2.0).floor().max(1.0) as u32;
    let height = (panel.height / 2.0).floor().max(1.0) as u32;
    (width, height)
}

pub fn draw_frame(
    game: &Game,
    app_state: &AppState,
    viewport: &mut ViewportTexture,
    run_seed: u64,
    layout: &FrameLayout,
    ui_scale: f32,
) {
    draw_viewport(app_state, viewport, layout.viewport);
    draw_panel_borders(layout, ui_scale);
    draw_status_panel(game, app_state, layout.status, ui_scale);
    draw_event_log(game, layout.event_log, ui_scale);
    draw_vitals_panel(game, layout.vitals, ui_scale);
    draw_lines(&ability_lines(game), "Abilities", layout.abilities, ui_scale);
    draw_lines(&progress_lines(game, run_seed), "Run", layout.progress, ui_scale);

    let outcome = match app_state.mode {
        AppMode::Dead => Some(RunOutcome::Death),
        AppMode::LevelCleared => Some(RunOutcome::LevelCleared),
        AppMode::Playing | AppMode::Paused => None,
    };
    if let Some(outcome) = outcome {
        draw_overlay(&recap_lines(game, run_seed, outcome), layout.viewport, ui_scale);
    } else if let Some(banner) = &app_state.banner {
        draw_banner(&banner.text, layout.viewport, ui_scale);
    }
}

fn draw_viewport(app_state: &AppState, viewport: &mut ViewportTexture, panel: PanelRect) {
    if let Some(texture) = viewport.upload(&app_state.surface) {
        draw_texture_ex(
            texture,
            panel.x,
            panel.y,
            WHITE,
            DrawTextureParams { dest_size: Some(vec2(panel.width, panel.height)), ..Default::default() },
        );
    }
    draw_crosshair(panel);
}

fn draw_crosshair(panel: PanelRect) {
    let cx = panel.x + panel.width / 2.0;
    let cy = panel.y + panel.height / 2.0;
    draw_line(cx - 6.0, cy, cx + 6.0, cy, 1.0, WHITE);
    draw_line(cx, cy - 6.0, cx, cy + 6.0, 1.0, WHITE);
}

fn draw_panel_borders(layout: &FrameLayout, ui_scale: f32) {
    for panel in layout.panels() {
        draw_rectangle_lines(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            scaled(BORDER_THICKNESS, ui_scale),
            BORDER_COLOR,
        );
    }
}

fn draw_status_panel(game: &Game, app_state: &AppState, panel: PanelRect, ui_scale: f32) {
    draw_text(
        &status_text(app_state.mode, game),
        panel.x + scaled(PANEL_PAD_X, ui_scale),
        panel.y + scaled(PANEL_PAD_Y, ui_scale),
        scaled(20.0, ui_scale),
        WHITE,
    );
}

fn draw_vitals_panel(game: &Game, panel: PanelRect, ui_scale: f32) {
    let player = &game.state().player;
    let x = panel.x + scaled(PANEL_PAD_X, ui_scale);
    let width = (panel.width - 2.0 * scaled(PANEL_PAD_X, ui_scale)).max(0.0);
    let mut y = panel.y + scaled(PANEL_PAD_Y, ui_scale) / 2.0;
    for (value, max, color) in [
        (player.health, player.max_health, HEALTH_COLOR),
        (player.mana, player.max_mana, MANA_COLOR),
    ] {
        draw_bar(x, y, width, scaled(BAR_HEIGHT, ui_scale), fraction(value, max), color);
        y += scaled(BAR_HEIGHT + 4.0, ui_scale);
    }
    let text_panel = PanelRect { y, height: (panel.y + panel.height - y).max(0.0), ..panel };
    draw_lines(&vitals_lines(game), "", text_panel, ui_scale);
}

fn draw_bar(x: f32, y: f32, width: f32, height: f32, filled: f32, color: Color) {
    draw_rectangle(x, y, width, height, BORDER_COLOR);
    draw_rectangle(x, y, width * filled, height, color);
}

fn draw_lines(lines: &[String], title: &str, panel: PanelRect, ui_scale: f32) {
    let text_x = panel.x + scaled(PANEL_PAD_X, ui_scale);
    let mut text_y = panel.y + scaled(PANEL_PAD_Y, ui_scale);
    if !title.is_empty() {
        draw_text(title, text_x, text_y, scaled(FONT_SIZE + 2.0, ui_scale), YELLOW);
        text_y += scaled(LINE_STEP, ui_scale);
    }
    let remaining_height = (panel.y + panel.height - text_y).max(0.0);
    for line in fit_lines_to_panel(lines, remaining_height, scaled(LINE_STEP, ui_scale)) {
        draw_text(&line, text_x, text_y, scaled(FONT_SIZE, ui_scale), LIGHTGRAY);
        text_y += scaled(LINE_STEP, ui_scale);
    }
}

fn draw_event_log(game: &Game, panel: PanelRect, ui_scale: f32) {
    let events = game.log();
    let start = events.len().saturating_sub(EVENT_LOG_LINES);
    let lines: Vec<String> = events[start..].iter().map(event_log_line).collect();
    draw_lines(&lines, "Event log", panel, ui_scale);
}

fn draw_overlay(lines: &[String], panel: PanelRect, ui_scale: f32) {
    draw_rectangle(panel.x, panel.y, panel.width, panel.height, Color::new(0.0, 0.0, 0.0, 0.6));
    let inset = PanelRect {
        x: panel.x + panel.width * 0.2,
        y: panel.y + panel.height * 0.25,
        width: panel.width * 0.6,
        height: panel.height * 0.5,
    };
    draw_lines(lines, "", inset, ui_scale);
}

fn draw_banner(text: &str, panel: PanelRect, ui_scale: f32) {
    let font_size = scaled(32.0, ui_scale);
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(
        text,
        panel.x + (panel.width - dims.width) / 2.0,
        panel.y + panel.height * 0.25,
        font_size,
        GOLD,
    );
}

/// Lines that fit in `height`; when some are hidden the last visible line
/// says how many.
fn fit_lines_to_panel(lines: &[String], height: f32, line_step: f32) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }

    let max_lines = (height.max(0.0) / line_step).floor() as usize;
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    if max_lines == 1 {
        return vec![format!("... and {} more", lines.len())];
    }

    let hidden_count = lines.len() - (max_lines - 1);
    let mut fitted_lines = lines[..max_lines - 1].to_vec();
    fitted_lines.push(format!("... and {hidden_count} more"));
    fitted_lines
}

fn fraction(value: f32, max: f32) -> f32 {
    if max > 0.0 && value.is_finite() { (value / max).clamp(0.0, 1.0) } else { 0.0 }
}

fn scaled(value: f32, ui_scale: f32) -> f32 {
    value * ui_scale
}

#[cfg(test)]
mod tests;
