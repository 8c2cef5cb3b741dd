//! Fixed-step ray marching and wall column projection.

use crate::config::RenderConfig;
use crate::grid::DungeonGrid;
use crate::rng::cosmetic_noise;
use crate::types::{Cell, Rgba, TileKind, Vec2, WallStyle};

use super::shade::{SIDE_SHADE, depth_darkening, distance_brightness, lit, wall_color};
use super::{FrameReport, RenderScene, Surface, Viewport, column_offset, quantize};

const SECRET_PULSE_RANGE: f32 = 3.0;
const SECRET_PULSE_COLOR: Rgba = Rgba::rgb(210, 180, 90);
const MOSS: Rgba = Rgba::rgb(60, 110, 50);

/// Which grid boundary the ray crossed on entering the hit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitSide {
    /// Crossed a vertical line (x changed); these faces are shaded darker.
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Raw distance along the ray, before fisheye correction.
    pub distance: f32,
    pub cell: Cell,
    pub tile: TileKind,
    pub side: HitSide,
}

/// Marches from `origin` in `march_step` increments until the ray enters a
/// non-floor cell or passes the render limit.
pub fn cast_ray(
    grid: &DungeonGrid,
    origin: Vec2,
    angle: f32,
    config: &RenderConfig,
) -> Option<RayHit> {
    let direction = Vec2::from_angle(angle);
    if !direction.is_finite() || !origin.is_finite() {
        return None;
    }
    let mut previous = origin.cell();
    let mut distance = 0.0;
    while distance < config.max_distance {
        distance += config.march_step;
        let cell = (origin + direction * distance).cell();
        if cell == previous {
            continue;
        }
        let tile = grid.tile_at(cell);
        if !tile.is_floor() {
            let side = if cell.x != previous.x { HitSide::Vertical } else { HitSide::Horizontal };
            return Some(RayHit { distance, cell, tile, side });
        }
        previous = cell;
    }
    None
}

fn cell_key(cell: Cell) -> i64 {
    ((cell.y as i64) << 32) ^ (cell.x as i64 & 0xFFFF_FFFF)
}

pub(super) fn draw_walls(
    scene: &RenderScene<'_>,
    config: &RenderConfig,
    view: &Viewport,
    surface: &mut Surface,
    report: &mut FrameReport,
) {
    let camera = scene.camera;
    let depth_light = depth_darkening(scene.depth);
    report.depth_buffer = vec![config.max_distance; config.ray_count as usize];

    for column in 0..config.ray_count as usize {
        let offset = column_offset(column, config.ray_count, config.fov);
        let Some(hit) = cast_ray(scene.grid, camera.pos, camera.angle + offset, config) else {
            continue;
        };
        let corrected = hit.distance * offset.cos();
        let projected = quantize(view.height / corrected, config.pixel_step);
        if !corrected.is_finite() || corrected <= 0.0 || !projected.is_finite() {
            report.rays_skipped += 1;
            continue;
        }
        report.depth_buffer[column] = corrected;

        let noise = cosmetic_noise(cell_key(hit.cell), column as i64);
        let mut column_height = projected;
        let mut top_jitter = 0.0;
        if hit.tile == TileKind::Wall(WallStyle::Cracked) {
            column_height *= 1.0 - 0.06 * noise;
            top_jitter = (noise - 0.5) * config.pixel_step as f32 * 2.0;
        }

        let mut brightness = distance_brightness(corrected) * depth_light;
        if hit.side == HitSide::Vertical {
            brightness *= SIDE_SHADE;
        }
        let mut base = wall_color(hit.tile);
        if hit.tile == TileKind::SecretDoor && corrected < SECRET_PULSE_RANGE {
            let pulse = (scene.time * 6.0).sin().abs();
            brightness *= 1.0 + 0.25 * pulse;
            base = base.mix(SECRET_PULSE_COLOR, 0.15 + 0.2 * pulse);
        }
        let color = lit(base, brightness, corrected, config.max_distance);

        let top = quantize(view.horizon - column_height / 2.0 + top_jitter, config.pixel_step);
        let bottom = quantize(view.horizon + column_height / 2.0, config.pixel_step);
        let (x0, x1) = view.column_span(column);
        surface.fill_rect(x0, top as i32, x1, bottom as i32, color);
        draw_style_pass(hit.tile, noise, (x0, x1), (top, bottom), color, config, surface);
        report.walls_drawn += 1;
    }
}

/// Secondary cosmetic passes for wall-style variants.
fn draw_style_pass(
    tile: TileKind,
    noise: f32,
    (x0, x1): (i32, i32),
    (top, bottom): (f32, f32),
    color: Rgba,
    config: &RenderConfig,
    surface: &mut Surface,
) {
    let height = bottom - top;
    let line = config.pixel_step.max(1) as i32;
    match tile {
        TileKind::Wall(WallStyle::Brick) => {
            let mortar = color.shade(0.7);
            for course in 1..4 {
                let y = (top + height * course as f32 / 4.0) as i32;
                surface.fill_rect(x0, y, x1, y + line, mortar);
            }
        }
        TileKind::Wall(WallStyle::Mossy) => {
            let moss_top = bottom - height * (0.2 + 0.2 * noise);
            surface.fill_rect(x0, moss_top as i32, x1, bottom as i32, color.mix(MOSS, 0.45));
        }
        TileKind::Wall(WallStyle::Crystal) if noise > 0.7 => {
            let glint_top = top + height / 3.0;
            let glint_bottom = top + height * 2.0 / 3.0;
            surface.fill_rect(x0, glint_top as i32, x1, glint_bottom as i32, color.shade(1.4));
        }
        _ => {}
    }
}
