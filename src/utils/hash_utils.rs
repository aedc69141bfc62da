pub struct MurMurHasher;

impl MurMurHasher {
    pub fn hash_str(str: &str) -> u128 {
        MurMurHasher::hash_bytes(str.as_bytes())
    }

    pub fn hash_bytes(bytes: &[u8]) -> u128 {
        fastmurmur3::murmur3_x64_128(bytes, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(MurMurHasher::hash_str("sci-fi"), MurMurHasher::hash_str("sci-fi"));
        assert_eq!(MurMurHasher::hash_str("sci-fi"), MurMurHasher::hash_bytes(b"sci-fi"));
        assert_ne!(MurMurHasher::hash_str("sci-fi"), MurMurHasher::hash_str("jazz"));
    }
}
