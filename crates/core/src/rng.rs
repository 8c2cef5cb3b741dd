//! Seedable randomness shared by generation and combat, plus pure mixing helpers.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Single gameplay random source. Every roll that can change the outcome of
/// a run goes through one of these so a fixed seed replays exactly.
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        (self.inner.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        probability > 0.0 && self.unit() < probability
    }

    /// Inclusive on both ends.
    pub fn range_usize(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let span = (max_value - min_value) as u64 + 1;
        min_value + (self.inner.next_u64() % span) as usize
    }

    /// Inclusive on both ends.
    pub fn range_i32(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (max_value as i64 - min_value as i64 + 1) as u64;
        (min_value as i64 + (self.inner.next_u64() % span) as i64) as i32
    }

    pub fn range_f32(&mut self, min_value: f32, max_value: f32) -> f32 {
        min_value + (max_value - min_value) * self.unit()
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.range_usize(0, items.len() - 1))
    }
}

pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Generation seed for one level, independent of anything played before it.
pub fn derive_level_seed(run_seed: u64, depth: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (depth as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Stateless hash in `[0, 1)` for cosmetic variation. Never feeds gameplay.
pub fn cosmetic_noise(a: i64, b: i64) -> f32 {
    let mixed = mix_seed_stream(a as u64, b as u64 ^ 0xA076_1D64_78BD_642F);
    (mixed >> 40) as f32 / (1u64 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_stay_inside_requested_bounds() {
        let mut rng = GameRng::seed_from_u64(12_345);
        for _ in 0..500 {
            assert!((7..=13).contains(&rng.range_usize(7, 13)));
            assert!((-3..=3).contains(&rng.range_i32(-3, 3)));
            let unit = rng.unit();
            assert!((0.0..1.0).contains(&unit));
        }
    }

    #[test]
    fn same_seed_gives_same_stream() {
        let mut a = GameRng::seed_from_u64(99);
        let mut b = GameRng::seed_from_u64(99);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn level_seed_changes_when_inputs_change() {
        let baseline = derive_level_seed(99, 2);
        assert_ne!(baseline, derive_level_seed(98, 2));
        assert_ne!(baseline, derive_level_seed(99, 3));
        assert_eq!(baseline, derive_level_seed(99, 2));
    }

    #[test]
    fn cosmetic_noise_is_pure_and_bounded() {
        for column in 0..64 {
            let value = cosmetic_noise(column, 7);
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, cosmetic_noise(column, 7));
        }
    }
}
