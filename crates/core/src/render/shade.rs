//! Color and brightness rules shared by walls and billboards.

use crate::types::{Rgba, TileKind, WallStyle};

pub const SIDE_SHADE: f32 = 0.72;
const FALLOFF: f32 = 0.18;
const DEPTH_DARKENING_PER_LEVEL: f32 = 0.05;
const MIN_DEPTH_LIGHT: f32 = 0.35;

pub const CEILING: Rgba = Rgba::rgb(24, 20, 30);
pub const FLOOR: Rgba = Rgba::rgb(46, 40, 36);
pub const FOG: Rgba = Rgba::rgb(8, 6, 12);

pub fn wall_color(tile: TileKind) -> Rgba {
    match tile {
        TileKind::Wall(WallStyle::Stone) | TileKind::SecretDoor => Rgba::rgb(128, 124, 118),
        TileKind::Wall(WallStyle::Brick) => Rgba::rgb(150, 82, 64),
        TileKind::Wall(WallStyle::Mossy) => Rgba::rgb(104, 122, 92),
        TileKind::Wall(WallStyle::Cracked) => Rgba::rgb(112, 106, 100),
        TileKind::Wall(WallStyle::Crystal) => Rgba::rgb(110, 140, 190),
        TileKind::Floor => FLOOR,
    }
}

pub fn distance_brightness(distance: f32) -> f32 {
    1.0 / (1.0 + FALLOFF * distance.max(0.0))
}

/// Deeper levels are darker overall, down to a floor.
pub fn depth_darkening(depth: u32) -> f32 {
    (1.0 - DEPTH_DARKENING_PER_LEVEL * depth.saturating_sub(1) as f32).max(MIN_DEPTH_LIGHT)
}

/// Final lit color: brightness, then fog toward the render limit.
pub fn lit(color: Rgba, brightness: f32, distance: f32, max_distance: f32) -> Rgba {
    let fog = (distance / max_distance).clamp(0.0, 1.0);
    color.shade(brightness).mix(FOG, fog * fog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_falls_with_distance() {
        assert_eq!(distance_brightness(0.0), 1.0);
        assert!(distance_brightness(5.0) < distance_brightness(2.0));
    }

    #[test]
    fn depth_darkening_is_floored() {
        assert_eq!(depth_darkening(1), 1.0);
        assert!((depth_darkening(3) - 0.9).abs() < 1e-6);
        assert_eq!(depth_darkening(100), MIN_DEPTH_LIGHT);
    }
}
