//! Column raycaster: one ray per screen column against the grid, a per-column
//! depth buffer, then depth-tested billboards drawn back to front.
//!
//! Rendering only reads the scene. Any non-finite distance, angle or size
//! skips that single ray or sprite for the frame.

mod shade;
mod sprites;
mod surface;
mod walls;

pub use surface::Surface;
pub use walls::{HitSide, RayHit, cast_ray};

use crate::config::RenderConfig;
use crate::grid::DungeonGrid;
use crate::types::{Rgba, Vec2};

/// Player pose as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub angle: f32,
    /// Vertical look offset as a fraction of screen height, positive looks up.
    pub pitch: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillboardAnchor {
    /// Stands on the floor line (creatures, items, chests).
    Floor,
    /// Floats at eye height (projectiles, effects).
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Billboard {
    pub pos: Vec2,
    pub color: Rgba,
    /// Size relative to a full wall column at the same distance.
    pub scale: f32,
    pub anchor: BillboardAnchor,
    /// Self-lit billboards ignore distance falloff.
    pub glow: bool,
}

/// Read-only view of everything one frame needs.
#[derive(Clone, Debug)]
pub struct RenderScene<'a> {
    pub grid: &'a DungeonGrid,
    pub camera: Camera,
    pub billboards: Vec<Billboard>,
    pub depth: u32,
    pub time: f32,
    pub shake: f32,
    pub flash: f32,
    pub flash_color: Rgba,
}

/// One billboard's outcome against the depth buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteDraw {
    /// Index into `RenderScene::billboards`.
    pub billboard: usize,
    /// Perpendicular distance used for the depth test.
    pub distance: f32,
    pub first_column: usize,
    pub last_column: usize,
    pub columns_drawn: usize,
    pub columns_occluded: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Corrected distance of the nearest wall per ray column; the render limit when nothing was hit.
    pub depth_buffer: Vec<f32>,
    pub walls_drawn: usize,
    pub rays_skipped: usize,
    pub sprites: Vec<SpriteDraw>,
    pub sprites_culled: usize,
    pub sprites_skipped: usize,
}

impl FrameReport {
    pub fn sprites_drawn(&self) -> usize {
        self.sprites.iter().filter(|sprite| sprite.columns_drawn > 0).count()
    }
}

/// Screen geometry shared by the wall and sprite passes.
pub(crate) struct Viewport {
    pub(crate) height: f32,
    pub(crate) horizon: f32,
    pub(crate) column_width: f32,
}

impl Viewport {
    fn new(scene: &RenderScene<'_>, config: &RenderConfig, surface: &Surface) -> Self {
        let height = surface.height() as f32;
        let pitch = finite_or_zero(scene.camera.pitch).clamp(-0.5, 0.5);
        let shake = finite_or_zero(scene.shake).clamp(0.0, 2.0);
        let wobble = finite_or_zero(shake * (scene.time * 47.0).sin() * height * 0.02);
        Self {
            height,
            horizon: height * (0.5 + pitch) + wobble,
            column_width: surface.width() as f32 / config.ray_count as f32,
        }
    }

    pub(crate) fn column_span(&self, column: usize) -> (i32, i32) {
        let x0 = (column as f32 * self.column_width).floor() as i32;
        let x1 = ((column + 1) as f32 * self.column_width).floor() as i32;
        (x0, x1.max(x0 + 1))
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Angle of ray `column` relative to the view direction.
pub fn column_offset(column: usize, ray_count: u32, fov: f32) -> f32 {
    -fov / 2.0 + fov * (column as f32 + 0.5) / ray_count as f32
}

pub(crate) fn quantize(value: f32, step: u32) -> f32 {
    let step = step.max(1) as f32;
    (value / step).round() * step
}

/// Draws one frame into `surface`. An empty surface, empty grid, invalid
/// config or non-finite camera yields a no-op frame.
pub fn render_frame(
    scene: &RenderScene<'_>,
    config: &RenderConfig,
    surface: &mut Surface,
) -> FrameReport {
    let mut report = FrameReport::default();
    if surface.is_empty()
        || scene.grid.is_empty()
        || config.validate().is_err()
        || !scene.camera.pos.is_finite()
        || !scene.camera.angle.is_finite()
    {
        return report;
    }

    let view = Viewport::new(scene, config, surface);
    let horizon = view.horizon.round() as i32;
    surface.fill_rect(0, 0, surface.width() as i32, horizon, shade::CEILING);
    surface.fill_rect(0, horizon, surface.width() as i32, surface.height() as i32, shade::FLOOR);

    walls::draw_walls(scene, config, &view, surface, &mut report);
    sprites::draw_sprites(scene, config, &view, surface, &mut report);

    if scene.flash.is_finite() {
        surface.tint(scene.flash_color, scene.flash.clamp(0.0, 1.0) * 0.6);
    }
    report
}
