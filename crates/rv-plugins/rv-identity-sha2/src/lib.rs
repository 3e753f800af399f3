//! # rv-identity-sha2
//!
//! SHA-256 implementation of `IdentityDeriver`.
//! Turns raw network/client signals into stable pseudonymous identities
//! and per-target dedup keys without ever persisting raw IPs or UA strings.

use rv_core::models::TargetType;
use rv_core::traits::IdentityDeriver;
use sha2::{Digest, Sha256};

/// Unsalted on purpose: the same visitor must map to the same anon id
/// across process restarts. Shared devices behind one NAT can collide;
/// that is an accepted limit of the heuristic, not a security boundary.
pub struct Sha256IdentityDeriver;

fn hex_digest(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

impl IdentityDeriver for Sha256IdentityDeriver {
    /// Fingerprint of `ip || user_agent`, 64 hex chars.
    fn derive_anon_id(&self, ip: &str, user_agent: &str) -> String {
        hex_digest(format!("{ip}{user_agent}").as_bytes())
    }

    /// Fingerprint of `"{target}:{slug}:{anon_id}"`; one key per
    /// (identity, target) pair.
    fn derive_voter_key(&self, target_type: TargetType, slug: &str, anon_id: &str) -> String {
        hex_digest(format!("{}:{}:{}", target_type.as_str(), slug, anon_id).as_bytes())
    }

    fn hash_signal(&self, raw: &str) -> String {
        hex_digest(raw.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_id_is_deterministic() {
        let d = Sha256IdentityDeriver;
        assert_eq!(d.derive_anon_id("1.2.3.4", "X"), d.derive_anon_id("1.2.3.4", "X"));
    }

    #[test]
    fn distinct_signals_yield_distinct_ids() {
        let d = Sha256IdentityDeriver;
        let base = d.derive_anon_id("1.2.3.4", "X");
        assert_ne!(base, d.derive_anon_id("1.2.3.5", "X"));
        assert_ne!(base, d.derive_anon_id("1.2.3.4", "Y"));
    }

    #[test]
    fn digests_are_64_lowercase_hex_chars() {
        let d = Sha256IdentityDeriver;
        for s in [
            d.derive_anon_id("", ""),
            d.derive_voter_key(TargetType::Post, "", ""),
            d.hash_signal(""),
        ] {
            assert_eq!(s.len(), 64);
            assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn voter_key_scopes_identity_to_one_target() {
        let d = Sha256IdentityDeriver;
        let anon = d.derive_anon_id("1.2.3.4", "X");
        let review_key = d.derive_voter_key(TargetType::Review, "dune-parte-dos", &anon);
        assert_eq!(
            review_key,
            d.derive_voter_key(TargetType::Review, "dune-parte-dos", &anon)
        );
        assert_ne!(
            review_key,
            d.derive_voter_key(TargetType::Post, "dune-parte-dos", &anon)
        );
        assert_ne!(
            review_key,
            d.derive_voter_key(TargetType::Review, "some-article", &anon)
        );
    }

    #[test]
    fn hash_signal_matches_known_sha256_vector() {
        let d = Sha256IdentityDeriver;
        assert_eq!(
            d.hash_signal(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
