use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use delve_core::rng::mix_seed_stream;

const RUNTIME_SEED_STREAM: u64 = 0x7365_6564;

/// Where the run seed came from, so the HUD can show whether a run is
/// reproducible from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }

    /// The seed for the next run after a restart. A command-line seed is
    /// kept so the same dungeon can be retried.
    pub fn next_run(self) -> Self {
        match self {
            Self::Cli(seed) => Self::Cli(seed),
            Self::Generated(_) => Self::Generated(generate_runtime_seed()),
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn unix_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis() as u64)
}

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64) ^ ((now_nanos >> 64) as u64) ^ pid.rotate_left(17);
    mix_seed_stream(entropy, RUNTIME_SEED_STREAM.wrapping_add(counter))
}

/// Reads `--seed N` or `--seed=N`; other arguments are left for the
/// windowing layer.
pub fn resolve_seed_from_args(args: &[String], generated_seed: u64) -> Result<SeedChoice, String> {
    let mut selected_seed = None;
    let mut remaining = args.iter().skip(1);

    while let Some(argument) = remaining.next() {
        let value = if argument == "--seed" {
            remaining
                .next()
                .map(String::as_str)
                .ok_or_else(|| "missing value for --seed".to_string())?
        } else if let Some(value) = argument.strip_prefix("--seed=") {
            value
        } else {
            continue;
        };
        if selected_seed.is_some() {
            return Err("seed provided more than once".to_string());
        }
        selected_seed = Some(parse_seed_value(value)?);
    }

    Ok(match selected_seed {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(generated_seed),
    })
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}
