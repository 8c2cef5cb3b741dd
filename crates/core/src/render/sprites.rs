//! Billboard projection, back-to-front ordering and per-column depth testing.

use std::f32::consts::{PI, TAU};

use crate::config::RenderConfig;
use crate::types::Vec2;

use super::shade::{depth_darkening, distance_brightness, lit};
use super::{
    Billboard, BillboardAnchor, Camera, FrameReport, RenderScene, SpriteDraw, Surface, Viewport,
    quantize,
};

const NEAR_CLIP: f32 = 0.1;

/// Wraps an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Projected {
    index: usize,
    perp: f32,
    center_column: f32,
    half_width: f32,
    size: f32,
    first: usize,
    last: usize,
}

enum Projection {
    Visible(Projected),
    Culled,
    Degenerate,
}

fn project(
    index: usize,
    billboard: &Billboard,
    camera: &Camera,
    config: &RenderConfig,
    view: &Viewport,
) -> Projection {
    if !billboard.pos.is_finite() || !billboard.scale.is_finite() || billboard.scale <= 0.0 {
        return Projection::Degenerate;
    }
    let relative: Vec2 = billboard.pos - camera.pos;
    let distance = relative.length();
    if !distance.is_finite() {
        return Projection::Degenerate;
    }
    if distance > config.max_distance || distance < NEAR_CLIP {
        return Projection::Culled;
    }
    let bearing = wrap_angle(relative.y.atan2(relative.x) - camera.angle);
    let perp = distance * bearing.cos();
    if !perp.is_finite() {
        return Projection::Degenerate;
    }
    if perp <= NEAR_CLIP {
        return Projection::Culled;
    }

    let angular_half_width = (billboard.scale / 2.0).atan2(perp);
    if bearing.abs() > config.fov / 2.0 + angular_half_width {
        return Projection::Culled;
    }

    let size = view.height / perp * billboard.scale;
    let rays_per_radian = config.ray_count as f32 / config.fov;
    let center_column = (bearing + config.fov / 2.0) * rays_per_radian;
    let half_width = (size / 2.0) / view.column_width;
    if !size.is_finite() || !center_column.is_finite() || !half_width.is_finite() {
        return Projection::Degenerate;
    }

    let first = (center_column - half_width).floor().max(0.0) as usize;
    let last = ((center_column + half_width).ceil().max(0.0) as usize).min(config.ray_count as usize);
    if first >= last {
        return Projection::Culled;
    }
    Projection::Visible(Projected { index, perp, center_column, half_width, size, first, last })
}

pub(super) fn draw_sprites(
    scene: &RenderScene<'_>,
    config: &RenderConfig,
    view: &Viewport,
    surface: &mut Surface,
    report: &mut FrameReport,
) {
    let mut visible = Vec::with_capacity(scene.billboards.len());
    for (index, billboard) in scene.billboards.iter().enumerate() {
        match project(index, billboard, &scene.camera, config, view) {
            Projection::Visible(projected) => visible.push(projected),
            Projection::Culled => report.sprites_culled += 1,
            Projection::Degenerate => report.sprites_skipped += 1,
        }
    }

    // Farthest first so nearer overlapping sprites land on top.
    visible.sort_by(|a, b| b.perp.total_cmp(&a.perp));

    let depth_light = depth_darkening(scene.depth);
    for projected in visible {
        let billboard = &scene.billboards[projected.index];
        let brightness =
            if billboard.glow { 1.0 } else { distance_brightness(projected.perp) * depth_light };
        let color = lit(billboard.color, brightness, projected.perp, config.max_distance);

        let center_y = match billboard.anchor {
            BillboardAnchor::Floor => {
                let floor_line = view.horizon + view.height / projected.perp / 2.0;
                floor_line - projected.size / 2.0
            }
            BillboardAnchor::Center => view.horizon,
        };

        let mut draw = SpriteDraw {
            billboard: projected.index,
            distance: projected.perp,
            first_column: projected.first,
            last_column: projected.last,
            columns_drawn: 0,
            columns_occluded: 0,
        };
        for column in projected.first..projected.last {
            if projected.perp >= report.depth_buffer[column] {
                draw.columns_occluded += 1;
                continue;
            }
            // Rounded silhouette: columns near the edge are shorter.
            let u = (column as f32 + 0.5 - projected.center_column) / projected.half_width.max(0.5);
            let shrink = (1.0 - u * u).max(0.0).sqrt();
            if shrink <= 0.0 {
                continue;
            }
            let half_height = projected.size / 2.0 * shrink;
            let top = quantize(center_y - half_height, config.pixel_step);
            let bottom = quantize(center_y + half_height, config.pixel_step);
            let (x0, x1) = view.column_span(column);
            surface.fill_rect(x0, top as i32, x1, bottom as i32, color);
            draw.columns_drawn += 1;
        }
        report.sprites.push(draw);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::corridor_scene;
    use super::super::{BillboardAnchor, render_frame};
    use super::*;
    use crate::grid::DungeonGrid;
    use crate::types::{Cell, Rgba, TileKind};

    fn sprite_at(x: f32, y: f32) -> Billboard {
        Billboard {
            pos: Vec2::new(x, y),
            color: Rgba::rgb(200, 50, 50),
            scale: 0.7,
            anchor: BillboardAnchor::Floor,
            glow: false,
        }
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for raw in [-10.0_f32, -PI, 0.0, 3.0, PI, 7.5, 100.0] {
            let wrapped = wrap_angle(raw);
            assert!((-PI..PI).contains(&wrapped), "{raw} -> {wrapped}");
            assert!(((raw - wrapped) / TAU - ((raw - wrapped) / TAU).round()).abs() < 1e-3);
        }
    }

    #[test]
    fn sprite_behind_a_wall_is_never_drawn() {
        let mut grid = DungeonGrid::open_room(14, 12);
        grid.set_tile(Cell::new(5, 5), TileKind::SOLID);
        let scene = corridor_scene(&grid, vec![sprite_at(8.5, 5.5)]);
        let mut surface = Surface::new(240, 120);
        let report = render_frame(&scene, &RenderConfig::desktop(), &mut surface);

        let sprite = report.sprites[0];
        assert_eq!(sprite.columns_drawn, 0);
        assert_eq!(sprite.columns_occluded, sprite.last_column - sprite.first_column);
        for column in sprite.first_column..sprite.last_column {
            assert!(sprite.distance >= report.depth_buffer[column]);
        }
    }

    #[test]
    fn visible_sprite_columns_are_nearer_than_walls() {
        let grid = DungeonGrid::open_room(14, 12);
        let scene = corridor_scene(&grid, vec![sprite_at(6.5, 5.5), sprite_at(4.5, 5.5)]);
        let mut surface = Surface::new(240, 120);
        let report = render_frame(&scene, &RenderConfig::desktop(), &mut surface);

        assert_eq!(report.sprites_drawn(), 2);
        // Sorted back to front.
        assert_eq!(report.sprites[0].billboard, 0);
        assert_eq!(report.sprites[1].billboard, 1);
        for sprite in &report.sprites {
            assert!(sprite.distance < report.depth_buffer[(sprite.first_column + sprite.last_column) / 2]);
        }
    }

    #[test]
    fn out_of_view_and_degenerate_sprites_are_skipped() {
        let grid = DungeonGrid::open_room(14, 12);
        let behind = sprite_at(0.9, 5.5);
        let far = sprite_at(1.5 + 30.0, 5.5);
        let broken = Billboard { pos: Vec2::new(f32::NAN, 5.5), ..sprite_at(3.0, 5.5) };
        let scene = corridor_scene(&grid, vec![behind, far, broken]);
        let mut surface = Surface::new(120, 60);
        let report = render_frame(&scene, &RenderConfig::constrained(), &mut surface);

        assert!(report.sprites.is_empty());
        assert_eq!(report.sprites_culled, 2);
        assert_eq!(report.sprites_skipped, 1);
    }
}
