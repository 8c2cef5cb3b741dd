mod frame_input;
mod game_layout;
mod ui_render;
mod ui_text;
mod window_config;

use std::env;
use std::path::{Path, PathBuf};

use app::app_loop::{AppMode, AppState};
use app::progress_file::ProgressFile;
use app::run_journal::RunJournal;
use app::seed::{SeedChoice, generate_runtime_seed, resolve_seed_from_args, unix_millis};
use app::settings::{QUALITY_ENV, Settings};
use delve_core::{Game, GameConfig, InputJournal, ProgressionSnapshot};
use frame_input::capture_frame_input;
use game_layout::{compute_frame_layout, setup_layout};
use macroquad::prelude::*;
use taffy::TaffyTree;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ui_render::{ViewportTexture, draw_frame, surface_size_for};
use window_config::{build_window_conf, runtime_ui_scale};

fn load_settings() -> Settings {
    let settings = match Settings::get_default_path() {
        Some(path) => Settings::load(&path).unwrap_or_else(|error| {
            warn!(%error, path = %path.display(), "settings unreadable; using defaults");
            Settings::default()
        }),
        None => Settings::default(),
    };
    settings.with_quality_override(env::var(QUALITY_ENV).ok().as_deref())
}

fn window_conf() -> Conf {
    build_window_conf(&load_settings())
}

struct Run {
    seed: SeedChoice,
    game: Game,
    app: AppState,
    journal: Option<RunJournal>,
}

fn start_run(
    seed: SeedChoice,
    config: &GameConfig,
    progression: ProgressionSnapshot,
    journal_dir: Option<&Path>,
) -> Option<Run> {
    let game = match Game::new(seed.value(), config.clone(), progression) {
        Ok(game) => game,
        Err(error) => {
            error!(%error, "invalid game config");
            return None;
        }
    };
    let journal = journal_dir.and_then(|dir| {
        let header = InputJournal::new(seed.value(), 1, progression, config.clone());
        RunJournal::start(dir, &header, unix_millis())
            .inspect_err(|error| warn!(%error, "run journal disabled"))
            .ok()
    });
    Some(Run { seed, game, app: AppState::new(1, 1), journal })
}

fn save_progress(progress: &mut ProgressFile, path: Option<&PathBuf>, game: &mut Game) {
    let Some(snapshot) = game.take_progression_if_dirty() else {
        return;
    };
    if let Some(path) = path
        && let Err(error) = progress.save_snapshot(&snapshot, path)
    {
        warn!(%error, path = %path.display(), "failed to save progress");
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = load_settings();
    let args: Vec<String> = env::args().collect();
    let seed = resolve_seed_from_args(&args, generate_runtime_seed()).unwrap_or_else(|message| {
        warn!(%message, "ignoring seed argument");
        SeedChoice::Generated(generate_runtime_seed())
    });
    let config = settings.game_config();

    let progress_path = ProgressFile::get_default_path();
    let mut progress = progress_path
        .as_deref()
        .map(|path| {
            ProgressFile::load(path).unwrap_or_else(|error| {
                warn!(%error, path = %path.display(), "progress unreadable; starting fresh");
                ProgressFile::default()
            })
        })
        .unwrap_or_default();
    let journal_dir = RunJournal::get_default_dir();

    let Some(mut run) = start_run(seed, &config, progress.snapshot(), journal_dir.as_deref())
    else {
        return;
    };

    let ui_scale = runtime_ui_scale(&settings);
    let mut taffy = TaffyTree::new();
    let nodes = match setup_layout(&mut taffy, ui_scale) {
        Ok(nodes) => nodes,
        Err(error) => {
            error!(%error, "layout setup failed");
            return;
        }
    };
    let mut viewport = ViewportTexture::default();
    info!(seed = run.seed.value(), ?settings.quality, ui_scale, "delve started");

    loop {
        let layout = match compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height())
        {
            Ok(layout) => layout,
            Err(error) => {
                error!(%error, "layout failed");
                return;
            }
        };
        let (surface_width, surface_height) = surface_size_for(layout.viewport);
        run.app.surface.resize(surface_width, surface_height);

        let input = capture_frame_input();
        if input.restart && run.app.mode == AppMode::Dead {
            let next = start_run(
                run.seed.next_run(),
                &config,
                progress.snapshot(),
                journal_dir.as_deref(),
            );
            if let Some(next) = next {
                run = next;
                run.app.surface.resize(surface_width, surface_height);
            }
        }

        run.app.tick(&mut run.game, &input.shell, get_frame_time());
        if let Some(journal) = run.journal.as_mut() {
            journal.record(&run.app.accepted_inputs);
        }
        save_progress(&mut progress, progress_path.as_ref(), &mut run.game);

        clear_background(BLACK);
        draw_frame(&run.game, &run.app, &mut viewport, run.seed.value(), &layout, ui_scale);
        next_frame().await;
    }
}
