//! # Voting Service
//!
//! The sole write path for votes. Enforces at-most-one-vote-per-identity-
//! per-target and keeps the voter's points and cached rank consistent.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Rating, TargetType, VoteOutcome, VoteRequest, Voter, VoterStatus};
use crate::ranks::rank_for;
use crate::traits::{IdentityDeriver, VoteStore};

/// Fixed award per accepted vote. The submitted 1-10 `value` is a rating
/// magnitude for the target, not a score weight for the voter.
pub const POINTS_PER_VOTE: i64 = 10;

/// Orchestrates identity derivation, duplicate detection, rating
/// persistence and point/rank bookkeeping. Stateless apart from the
/// injected store; one instance is shared across all requests.
pub struct VotingService {
    store: Arc<dyn VoteStore>,
    identity: Arc<dyn IdentityDeriver>,
    points_per_vote: i64,
}

impl VotingService {
    pub fn new(store: Arc<dyn VoteStore>, identity: Arc<dyn IdentityDeriver>) -> Self {
        Self {
            store,
            identity,
            points_per_vote: POINTS_PER_VOTE,
        }
    }

    /// Overrides the per-vote award (e.g., for a future value-weighted mode).
    pub fn with_points_per_vote(mut self, points: i64) -> Self {
        self.points_per_vote = points;
        self
    }

    /// Casts one vote for the identity derived from the request's client
    /// signals.
    ///
    /// A repeat vote on the same target is not an error: it returns
    /// `already_voted: true` with the voter's current totals. Validation
    /// failures never reach the store.
    pub async fn cast_vote(&self, req: VoteRequest) -> Result<VoteOutcome> {
        let (target_type, slug, value) = validate(&req)?;

        let anon_id = self.identity.derive_anon_id(&req.client_ip, &req.user_agent);
        let voter_key = self.identity.derive_voter_key(target_type, &slug, &anon_id);

        if self
            .store
            .find_rating_by_voter_key(&voter_key)
            .await?
            .is_some()
        {
            let voter = self.find_or_create_voter(&anon_id).await?;
            return Ok(VoteOutcome::duplicate(voter.points, voter.rank));
        }

        let voter = self.find_or_create_voter(&anon_id).await?;

        let rating = Rating {
            id: Uuid::now_v7(),
            target_type,
            slug,
            value,
            voter_key,
            anon_id,
            ip_hash: self.identity.hash_signal(&req.client_ip),
            user_agent_hash: self.identity.hash_signal(&req.user_agent),
            created_at: Utc::now(),
        };

        // The rating insert is the durability boundary: once it lands the
        // vote is cast, even if the point award below fails.
        match self.store.create_rating(rating).await {
            Ok(_) => {}
            // A concurrent vote for the same voter_key won the race.
            Err(AppError::Conflict(_)) => {
                return Ok(VoteOutcome::duplicate(voter.points, voter.rank));
            }
            Err(err) => return Err(err),
        }

        let new_points = voter.points + self.points_per_vote;
        let new_rank = rank_for(new_points);
        let updated = self.store.update_voter(voter.id, new_points, new_rank).await?;

        Ok(VoteOutcome::recorded(
            self.points_per_vote,
            updated.points,
            updated.rank,
        ))
    }

    /// Read-only reputation for the caller's derived identity. A visitor
    /// who never voted reads as zero points at the lowest tier.
    pub async fn voter_status(&self, client_ip: &str, user_agent: &str) -> Result<VoterStatus> {
        let anon_id = self.identity.derive_anon_id(client_ip, user_agent);
        let status = match self.store.find_voter(&anon_id).await? {
            Some(voter) => VoterStatus {
                total_points: voter.points,
                rank: voter.rank,
            },
            None => VoterStatus {
                total_points: 0,
                rank: rank_for(0).to_string(),
            },
        };
        Ok(status)
    }

    async fn find_or_create_voter(&self, anon_id: &str) -> Result<Voter> {
        if let Some(voter) = self.store.find_voter(anon_id).await? {
            return Ok(voter);
        }
        let fresh = Voter {
            id: Uuid::now_v7(),
            anon_id: anon_id.to_string(),
            points: 0,
            rank: rank_for(0).to_string(),
            created_at: Utc::now(),
        };
        match self.store.create_voter(fresh).await {
            Ok(voter) => Ok(voter),
            // Another request created the row between our read and write.
            Err(AppError::Conflict(_)) => {
                self.store.find_voter(anon_id).await?.ok_or_else(|| {
                    AppError::Internal(format!("voter {anon_id} vanished after create conflict"))
                })
            }
            Err(err) => Err(err),
        }
    }
}

fn validate(req: &VoteRequest) -> Result<(TargetType, String, i32)> {
    let target_type = TargetType::parse(&req.target_type)
        .ok_or_else(|| AppError::Validation("targetType must be \"review\" or \"post\"".into()))?;

    let slug = req.slug.trim();
    if slug.is_empty() {
        return Err(AppError::Validation("slug must not be empty".into()));
    }

    let value = req.value;
    if !value.is_finite() || value.fract() != 0.0 || !(1.0..=10.0).contains(&value) {
        return Err(AppError::Validation(
            "value must be an integer between 1 and 10".into(),
        ));
    }

    Ok((target_type, slug.to_string(), value as i32))
}
