//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Rating, TargetType, Voter};

/// Pseudonymous identity contract.
///
/// All three derivations are deterministic and total: any input strings
/// (including empty) yield a fixed-length digest.
pub trait IdentityDeriver: Send + Sync {
    /// Stable fingerprint for an otherwise-anonymous client.
    fn derive_anon_id(&self, ip: &str, user_agent: &str) -> String;

    /// Dedup key scoping one identity to one votable target.
    fn derive_voter_key(&self, target_type: TargetType, slug: &str, anon_id: &str) -> String;

    /// One-way digest of a single raw client signal, for forensic storage.
    fn hash_signal(&self, raw: &str) -> String;
}

/// Data persistence contract for ratings and voters (the Persistence Gateway).
#[async_trait]
pub trait VoteStore: Send + Sync {
    // Rating operations
    async fn find_rating_by_voter_key(&self, voter_key: &str) -> Result<Option<Rating>>;

    /// Insert-if-absent on `voter_key`: a second rating for the same key
    /// must fail with `AppError::Conflict`. This is what makes the service's
    /// duplicate check effectively exactly-once under concurrency.
    async fn create_rating(&self, rating: Rating) -> Result<Rating>;

    // Voter operations
    async fn find_voter(&self, anon_id: &str) -> Result<Option<Voter>>;

    /// A second voter row for the same `anon_id` must fail with
    /// `AppError::Conflict`.
    async fn create_voter(&self, voter: Voter) -> Result<Voter>;

    async fn update_voter(&self, id: Uuid, points: i64, rank: &str) -> Result<Voter>;
}
