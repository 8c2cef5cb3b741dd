use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use delve_core::journal_file::load_journal_from_file;
use delve_core::{ReplayResult, replay_to_end};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Replays a recorded run journal", long_about = None)]
struct Args {
    /// Path to the run journal (.jsonl) to replay
    #[arg(short, long)]
    journal: PathBuf,

    /// Fail unless the final snapshot hash matches, e.g. 0x00ab...
    #[arg(long)]
    expect_hash: Option<String>,
}

fn parse_hash(raw: &str) -> Result<u64> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16).with_context(|| format!("invalid snapshot hash: {raw}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
    let args = Args::parse();

    let loaded = load_journal_from_file(&args.journal)
        .with_context(|| format!("failed to load journal: {}", args.journal.display()))?;
    let journal = loaded.journal;
    println!(
        "Journal: seed {} depth {} inputs {} build {}",
        journal.seed,
        journal.depth,
        journal.inputs.len(),
        journal.build_id
    );

    let result: ReplayResult = replay_to_end(&journal).context("replay failed")?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    println!("Final Depth: {}", result.final_depth);
    println!("Outcome: {:?}", result.final_outcome);
    println!("Snapshot Hash: 0x{:016x}", result.final_snapshot_hash);

    if let Some(expected) = args.expect_hash.as_deref() {
        let expected = parse_hash(expected)?;
        if expected != result.final_snapshot_hash {
            bail!(
                "snapshot hash mismatch: expected 0x{expected:016x}, replayed 0x{:016x}",
                result.final_snapshot_hash
            );
        }
        println!("Snapshot hash matches.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_hash;

    #[test]
    fn hashes_parse_with_or_without_prefix() {
        assert_eq!(parse_hash("0x00000000000000ff").unwrap(), 255);
        assert_eq!(parse_hash("ff").unwrap(), 255);
        assert!(parse_hash("0xnothex").is_err());
    }
}
