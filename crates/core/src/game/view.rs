//! Read-only scene assembly for the renderer.

use super::*;
use crate::content::pickup_def;
use crate::render::{Billboard, BillboardAnchor, Camera, RenderScene};

const FROST_TINT: Rgba = Rgba::rgb(150, 210, 255);
const BURN_TINT: Rgba = Rgba::rgb(255, 120, 40);
const ALLY_COLOR: Rgba = Rgba::rgb(120, 230, 160);
const CHEST_COLOR: Rgba = Rgba::rgb(200, 150, 50);
const SECRET_CHEST_COLOR: Rgba = Rgba::rgb(230, 200, 90);

impl Game {
    /// Everything the renderer draws this frame. Borrows the grid; never
    /// mutates the game.
    pub fn render_scene(&self) -> RenderScene<'_> {
        let state = &self.state;
        let mut billboards = Vec::with_capacity(
            state.enemies.len() + state.items.len() + state.projectiles.len() + state.allies.len(),
        );

        billboards.extend(state.enemies.values().map(|enemy| {
            let def = enemy_def(enemy.kind);
            let color = if enemy.status.frozen > 0.0 {
                def.color.mix(FROST_TINT, 0.5)
            } else if enemy.status.burning > 0.0 {
                def.color.mix(BURN_TINT, 0.35)
            } else {
                def.color
            };
            Billboard {
                pos: enemy.pos,
                color,
                scale: def.size.billboard_scale(),
                anchor: BillboardAnchor::Floor,
                glow: false,
            }
        }));
        billboards.extend(state.items.iter().filter(|item| !item.collected).map(|item| Billboard {
            pos: item.pos,
            color: pickup_def(item.kind).color,
            scale: 0.3,
            anchor: BillboardAnchor::Floor,
            glow: true,
        }));
        billboards.extend(state.chests.iter().filter(|chest| !chest.opened).map(|chest| Billboard {
            pos: chest.pos,
            color: if chest.in_secret_room { SECRET_CHEST_COLOR } else { CHEST_COLOR },
            scale: 0.45,
            anchor: BillboardAnchor::Floor,
            glow: chest.in_secret_room,
        }));
        billboards.extend(state.projectiles.iter().filter(|p| p.alive).map(|projectile| {
            Billboard {
                pos: projectile.pos,
                color: projectile.color,
                scale: 0.2,
                anchor: BillboardAnchor::Center,
                glow: true,
            }
        }));
        billboards.extend(state.allies.iter().map(|ally| Billboard {
            pos: ally.pos,
            color: ALLY_COLOR,
            scale: 0.6,
            anchor: BillboardAnchor::Floor,
            glow: false,
        }));

        RenderScene {
            grid: &state.grid,
            camera: Camera {
                pos: state.player.pos,
                angle: state.player.angle,
                pitch: state.player.pitch,
            },
            billboards,
            depth: state.depth,
            time: self.time,
            shake: state.shake,
            flash: state.flash,
            flash_color: state.flash_color,
        }
    }
}
