//! Text formatting for the status bar, HUD panels, recaps and the event log.

use app::app_loop::AppMode;
use app::{format_snapshot_hash, reason_code};
use delve_core::content::{ability_def, enemy_def, pickup_def};
use delve_core::{BuffKind, ChestReward, Game, LogEvent, RunOutcome};

pub fn status_text(mode: AppMode, game: &Game) -> String {
    let depth = game.state().depth;
    match mode {
        AppMode::Playing if game.state().boss_level => {
            format!("Depth {depth} - boss level (Esc to pause, F to search for secrets)")
        }
        AppMode::Playing => format!("Depth {depth} (Esc to pause, F to search for secrets)"),
        AppMode::Paused => "Paused (Esc to resume)".to_string(),
        AppMode::LevelCleared => {
            format!("Depth {depth} cleared! Enter to descend to depth {}", depth + 1)
        }
        AppMode::Dead => "You died. R to start a new run".to_string(),
    }
}

pub fn vitals_lines(game: &Game) -> Vec<String> {
    let player = &game.state().player;
    let mut lines = vec![
        format!("HP {:.0}/{:.0}", player.health, player.max_health),
        format!("MP {:.0}/{:.0}", player.mana, player.max_mana),
        format!("Lv {}  XP {}/{}", player.level, player.xp, player.xp_to_next),
    ];
    if let Some(ward) = player.ward {
        lines.push(format!("Ward: {ward} hits"));
    }
    for (kind, label) in [
        (BuffKind::DamageBoost, "Damage"),
        (BuffKind::SpeedBoost, "Swiftness"),
        (BuffKind::Invincibility, "Invulnerable"),
    ] {
        let remaining = player.buffs.remaining(kind);
        if remaining > 0.0 {
            lines.push(format!("{label} {remaining:.1}s"));
        }
    }
    lines
}

/// One line per equipped ability; the selected one is marked.
pub fn ability_lines(game: &Game) -> Vec<String> {
    let player = &game.state().player;
    player
        .abilities
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let def = ability_def(slot.id);
            let marker = if index == player.selected { '>' } else { ' ' };
            if slot.cooldown > 0.0 {
                format!("{marker} {} ({:.1}s)", def.name, slot.cooldown)
            } else {
                format!("{marker} {} [{:.0} mp]", def.name, def.mana_cost)
            }
        })
        .collect()
}

pub fn progress_lines(game: &Game, run_seed: u64) -> Vec<String> {
    let state = game.state();
    let player = &state.player;
    let combo = state.combo.count();
    let mut lines = vec![
        format!("Gold {}  Kills {}", player.gold, player.kills),
        format!("Essence +{} (bank {})", player.essence_earned, game.progression().essence),
        format!("Enemies left {}", state.enemies.len()),
        format!("Seed {run_seed}"),
    ];
    if combo > 1 {
        lines.insert(0, format!("Combo x{combo}"));
    }
    lines
}

pub fn recap_lines(game: &Game, run_seed: u64, outcome: RunOutcome) -> Vec<String> {
    let state = game.state();
    let player = &state.player;
    vec![
        "Run recap:".to_string(),
        format!("Reason: {}", reason_code(outcome)),
        format!("Seed: {run_seed}"),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
        format!("Depth: {}  Tick: {}", state.depth, game.current_tick()),
        format!("Kills: {}  Gold: {}  Essence: +{}", player.kills, player.gold, player.essence_earned),
    ]
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::LevelStarted { depth, boss_level: true } => {
            format!("Depth {depth}: something large stirs")
        }
        LogEvent::LevelStarted { depth, .. } => format!("Entered depth {depth}"),
        LogEvent::AbilityCast { ability } => format!("Cast {}", ability_def(*ability).name),
        LogEvent::EnemyKilled { kind, xp, gold, .. } => {
            format!("Killed {} (+{xp} xp, +{gold} gold)", enemy_def(*kind).name)
        }
        LogEvent::PlayerDamaged { amount } => format!("Took {amount:.0} damage"),
        LogEvent::WardAbsorbed { remaining } => format!("Ward absorbed a hit ({remaining} left)"),
        LogEvent::LevelUp { level } => format!("Reached level {level}"),
        LogEvent::PickupCollected { kind } => format!("Picked up {}", pickup_def(*kind).name),
        LogEvent::ChestOpened { reward } => match reward {
            ChestReward::Gold(gold) => format!("Chest: {gold} gold"),
            ChestReward::Upgrade(kind) => format!("Chest: permanent {} upgrade", kind.name()),
            ChestReward::Ability(ability) => {
                format!("Chest: learned {}", ability_def(*ability).name)
            }
        },
        LogEvent::SecretDoorRevealed { .. } => "A hidden door slides open".to_string(),
        LogEvent::BossSummoned { count } => format!("The boss summons {count} minions"),
        LogEvent::AllySummoned => "A fallen foe rises to fight for you".to_string(),
        LogEvent::RunEnded { outcome } => format!("Run ended: {}", reason_code(*outcome)),
    }
}
