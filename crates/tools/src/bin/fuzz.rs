use anyhow::{Result, bail};
use clap::Parser;
use delve_core::{ControlState, Game, GameConfig, ProgressionSnapshot, RunOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Drives runs with random controls and checks invariants", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u32,
    /// Number of runs; run N uses seed + N
    #[arg(short, long, default_value_t = 1)]
    cases: u32,
}

#[derive(Default)]
struct Summary {
    deaths: u32,
    clears: u32,
    deepest: u32,
    ticks: u64,
}

fn axis(rng: &mut ChaCha8Rng) -> f32 {
    match rng.next_u32() % 4 {
        0 => -1.0,
        1 => 1.0,
        2 => 0.0,
        _ => (rng.next_u32() % 2001) as f32 / 1000.0 - 1.0,
    }
}

fn random_controls(rng: &mut ChaCha8Rng) -> ControlState {
    ControlState {
        move_x: axis(rng),
        // Bias forward so runs actually explore.
        move_y: if rng.next_u32() % 3 == 0 { axis(rng) } else { 1.0 },
        look_x: axis(rng),
        look_y: axis(rng),
        primary: rng.next_u32() % 2 == 0,
        next_ability: rng.next_u32() % 40 == 0,
        previous_ability: rng.next_u32() % 40 == 0,
        pause: false,
        reveal: rng.next_u32() % 10 == 0,
    }
}

fn check_invariants(game: &Game, seed: u64) -> Result<()> {
    let state = game.state();
    let player = &state.player;
    if !(0.0..=player.max_health).contains(&player.health) {
        bail!("seed {seed}: player health {} outside 0..={}", player.health, player.max_health);
    }
    if !(0.0..=player.max_mana).contains(&player.mana) {
        bail!("seed {seed}: player mana {} outside 0..={}", player.mana, player.max_mana);
    }
    if !state.grid.is_floor_at(player.pos) {
        bail!("seed {seed}: player inside wall at {:?}", player.pos);
    }
    for enemy in state.enemies.values() {
        if !enemy.pos.is_finite() || enemy.health > enemy.max_health {
            bail!("seed {seed}: bad enemy state {:?} hp {}", enemy.pos, enemy.health);
        }
        if !state.grid.is_floor_at(enemy.pos) {
            bail!("seed {seed}: enemy inside wall at {:?}", enemy.pos);
        }
    }
    for projectile in state.projectiles.iter().filter(|projectile| projectile.alive) {
        if !state.grid.is_floor_at(projectile.pos) {
            bail!("seed {seed}: projectile inside wall at {:?}", projectile.pos);
        }
    }
    if let Some(ally) = state.allies.iter().find(|ally| !state.grid.is_floor_at(ally.pos)) {
        bail!("seed {seed}: ally inside wall at {:?}", ally.pos);
    }
    Ok(())
}

fn fuzz_run(seed: u64, max_ticks: u32, summary: &mut Summary) -> Result<()> {
    let mut game = Game::new(seed, GameConfig::default(), ProgressionSnapshot::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..max_ticks {
        let result = game.tick(&random_controls(&mut rng), 1.0 / 60.0);
        match result.outcome {
            Some(RunOutcome::Death) => {
                summary.deaths += 1;
                break;
            }
            Some(RunOutcome::LevelCleared) => {
                summary.clears += 1;
                if game.descend().is_none() {
                    bail!("seed {seed}: cleared level refused descend");
                }
            }
            None => check_invariants(&game, seed)?,
        }
    }

    summary.deepest = summary.deepest.max(game.state().depth);
    summary.ticks += game.current_tick();
    info!(seed, depth = game.state().depth, tick = game.current_tick(), "run finished");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
    let args = Args::parse();

    println!(
        "Starting fuzz harness: {} runs from seed {} for max {} ticks each...",
        args.cases, args.seed, args.ticks
    );
    let mut summary = Summary::default();
    for case in 0..args.cases {
        fuzz_run(args.seed.wrapping_add(u64::from(case)), args.ticks, &mut summary)?;
    }

    println!(
        "Fuzzing completed: {} ticks, {} deaths, {} clears, deepest depth {}",
        summary.ticks, summary.deaths, summary.clears, summary.deepest
    );
    Ok(())
}
