//! Deterministic choice selection.
//!
//! Every decision the engine makes flows through [`stable_index`]: a BLAKE3
//! hash over the seed and a per-decision salt, reduced modulo the option
//! count. No ambient RNG is involved, so a choice depends only on
//! `(seed, variety, salt, option_count)`.

/// Computes a reproducible option index.
///
/// The hash input is `"{seed}:{salt}"`, with `":v{variety}"` appended when
/// `variety` is non-zero so each lane draws an independent sequence. The
/// first 16 bytes of the digest are interpreted as a little-endian `u128`
/// and reduced modulo `option_count`.
///
/// # Arguments
/// * `seed` - The base seed
/// * `variety` - The variety lane (0 = no lane suffix)
/// * `salt` - A per-decision salt such as `choice#3` or `wild#0:hair`
/// * `option_count` - Number of options to choose among
///
/// # Returns
/// An index in `[0, option_count)`, or 0 when `option_count` is 0
pub fn stable_index(seed: u32, variety: u32, salt: &str, option_count: usize) -> usize {
    if option_count == 0 {
        return 0;
    }

    let key = if variety != 0 {
        format!("{}:{}:v{}", seed, salt, variety)
    } else {
        format!("{}:{}", seed, salt)
    };

    let hash = blake3::hash(key.as_bytes());

    // Take the first 16 bytes as a little-endian u128
    let bytes: [u8; 16] = hash.as_bytes()[0..16].try_into().unwrap();
    let value = u128::from_le_bytes(bytes);

    (value % option_count as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_index_determinism() {
        for seed in [0u32, 1, 42, u32::MAX] {
            let a = stable_index(seed, 0, "choice#0", 7);
            let b = stable_index(seed, 0, "choice#0", 7);
            assert_eq!(a, b);
            assert!(a < 7);
        }
    }

    #[test]
    fn test_single_option_always_zero() {
        for seed in 0..200u32 {
            assert_eq!(stable_index(seed, 0, "choice#0", 1), 0);
            assert_eq!(stable_index(seed, 5, "wild#0:hair", 1), 0);
        }
    }

    #[test]
    fn test_zero_options_returns_zero() {
        assert_eq!(stable_index(42, 0, "choice#0", 0), 0);
    }

    #[test]
    fn test_different_salts_diverge() {
        // With 1000 options, identical picks across distinct salts would be
        // a strong sign the salt is being ignored.
        let a = stable_index(42, 0, "choice#0", 1000);
        let b = stable_index(42, 0, "choice#1", 1000);
        let c = stable_index(42, 0, "wild#0:hair", 1000);
        assert!(a != b || b != c);
    }

    #[test]
    fn test_variety_lane_diverges() {
        let picks_lane0: Vec<usize> = (0..16)
            .map(|i| stable_index(42, 0, &format!("choice#{}", i), 1000))
            .collect();
        let picks_lane1: Vec<usize> = (0..16)
            .map(|i| stable_index(42, 1, &format!("choice#{}", i), 1000))
            .collect();
        assert_ne!(picks_lane0, picks_lane1);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let picks_a: Vec<usize> = (0..16)
            .map(|i| stable_index(1, 0, &format!("choice#{}", i), 1000))
            .collect();
        let picks_b: Vec<usize> = (0..16)
            .map(|i| stable_index(2, 0, &format!("choice#{}", i), 1000))
            .collect();
        assert_ne!(picks_a, picks_b);
    }
}
