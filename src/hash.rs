//! Stable string hashing for seed -> note derivation.
//!
//! Deterministic modes must map the same key to the same pitch in every
//! session on every machine, so the hash uses fixed FNV-1a parameters
//! rather than the process-seeded `DefaultHasher`.

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a (32-bit) over the UTF-8 bytes of `seed`.
pub fn seed_hash(seed: &str) -> u32 {
    let mut h = FNV_OFFSET;
    for byte in seed.bytes() {
        h ^= byte as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_across_calls() {
        assert_eq!(seed_hash("a"), seed_hash("a"));
        assert_eq!(seed_hash("KEY_SPACE"), seed_hash("KEY_SPACE"));
        assert_ne!(seed_hash("a"), seed_hash("b"));
    }

    #[test]
    fn reference_vectors() {
        // Published FNV-1a 32-bit test vectors.
        assert_eq!(seed_hash(""), 0x811c_9dc5);
        assert_eq!(seed_hash("a"), 0xe40c_292c);
        assert_eq!(seed_hash("foobar"), 0xbf9c_f968);
    }
}
