//! Receipt identifiers

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Produces the identifier a score is stored under.
pub type IdGenerator = fn(&str) -> String;

/// Random UUID for an empty seed, otherwise a UUID built from the first 16
/// bytes of the seed's SHA-256 digest.
pub fn generate_id(seed: &str) -> String {
    if seed.is_empty() {
        return Uuid::new_v4().to_string();
    }

    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes).to_string()
}

/// Returns true if `id` has the shape of an identifier this service issues.
pub fn is_valid_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_seed_is_random() {
        let a = generate_id("");
        let b = generate_id("");
        assert_ne!(a, b);
        assert!(is_valid_id(&a));
    }

    #[test]
    fn test_seeded_id_is_deterministic() {
        let a = generate_id("receipt data");
        assert_eq!(a, generate_id("receipt data"));
        assert_ne!(a, generate_id("other receipt"));
        assert!(is_valid_id(&a));
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("af523d7a-e8d0-4af0-8bbd-d2340a4da5a4"));
        assert!(!is_valid_id("af523d7a"));
        assert!(!is_valid_id(""));
    }
}
