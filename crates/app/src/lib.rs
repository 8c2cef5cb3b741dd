//! Desktop shell around `delve_core`: frame pacing, settings, persistence and
//! run journals. Drawing and window setup live in the `delve` binary.

pub mod app_loop;
pub mod progress_file;
pub mod run_journal;
pub mod seed;
pub mod settings;

use delve_core::RunOutcome;

pub const APP_NAME: &str = "Delve";

/// Snapshot hashes are shown as `0x` and 16 lowercase hex digits, the same
/// form the replay tool prints.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Stable code for the recap screen and logs.
pub fn reason_code(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Death => "DEATH",
        RunOutcome::LevelCleared => "LEVEL_CLEARED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_hash_is_zero_padded() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
        assert_eq!(format_snapshot_hash(u64::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn each_outcome_has_a_code() {
        assert_eq!(reason_code(RunOutcome::Death), "DEATH");
        assert_eq!(reason_code(RunOutcome::LevelCleared), "LEVEL_CLEARED");
    }
}
