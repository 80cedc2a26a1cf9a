//! Deterministic hash-based v1 rollout.
//!
//! `SUGGEST_POLICY_VERSION=auto` splits traffic between v0 and v1 by hashing
//! `hand_id`, not by flipping a coin — the same hand always rolls the same
//! way, and the empirical rate converges to the configured percentage.

use sha1::{Digest, Sha1};

/// SHA-1 of `hand_id`; take the first 8 hex characters as an unsigned
/// integer, mod 100, compare `< pct`. Deterministic and stable across
/// processes (no RNG, no clock).
pub fn stable_roll(hand_id: &str, pct: u32) -> bool {
    let mut hasher = Sha1::new();
    hasher.update(hand_id.as_bytes());
    let digest = hasher.finalize();
    let hex = format!("{:02x}{:02x}{:02x}{:02x}", digest[0], digest[1], digest[2], digest[3]);
    let n = u32::from_str_radix(&hex, 16).unwrap_or(0);
    (n % 100) < pct.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_hand_id() {
        for pct in [0u32, 20, 50, 100] {
            let a = stable_roll("hand-123", pct);
            let b = stable_roll("hand-123", pct);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn zero_percent_never_rolls_to_v1() {
        for i in 0..500 {
            assert!(!stable_roll(&format!("hand-{i}"), 0));
        }
    }

    #[test]
    fn hundred_percent_always_rolls_to_v1() {
        for i in 0..500 {
            assert!(stable_roll(&format!("hand-{i}"), 100));
        }
    }

    #[test]
    fn rollout_rate_at_20_percent_is_within_band() {
        let hits = (0..10_000).filter(|i| stable_roll(&format!("hand-{i}"), 20)).count();
        let rate = hits as f64 / 10_000.0;
        assert!((0.17..=0.23).contains(&rate), "rate {rate} outside [0.17, 0.23]");
    }
}
