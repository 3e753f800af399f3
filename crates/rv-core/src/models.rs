//! # Domain Models
//!
//! These structs represent the core entities of rusty-votes.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of votable content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Review,
    Post,
}

impl TargetType {
    /// Parses caller input leniently: trimmed and case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "review" => Some(Self::Review),
            "post" => Some(Self::Post),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Post => "post",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pseudonymous visitor and their accumulated reputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voter {
    pub id: Uuid,
    /// Stable fingerprint derived from client signals; unique per visitor
    pub anon_id: String,
    /// Non-negative and monotonically non-decreasing
    pub points: i64,
    /// Cached tier name; always `ranks::rank_for(points)` as of the last write
    pub rank: String,
    pub created_at: DateTime<Utc>,
}

/// One accepted vote on one target by one voter. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub target_type: TargetType,
    /// Identifier of the voted-on content item, opaque to this subsystem
    pub slug: String,
    /// Vote magnitude, 1..=10
    pub value: i32,
    /// Dedup key scoping one identity to one target; unique
    pub voter_key: String,
    pub anon_id: String,
    /// One-way digests of the raw signals, kept for abuse forensics
    /// without storing raw PII
    pub ip_hash: String,
    pub user_agent_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Raw, unvalidated vote submission as assembled by the web layer.
#[derive(Debug, Clone)]
pub struct VoteRequest {
    pub target_type: String,
    pub slug: String,
    pub value: f64,
    pub client_ip: String,
    pub user_agent: String,
}

/// Result of a `cast_vote` call; serialized verbatim to the API client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub accepted: bool,
    pub already_voted: bool,
    pub points_added: i64,
    pub total_points: i64,
    pub rank: String,
}

impl VoteOutcome {
    /// A new vote was durably recorded and points awarded.
    pub fn recorded(points_added: i64, total_points: i64, rank: String) -> Self {
        Self {
            accepted: true,
            already_voted: false,
            points_added,
            total_points,
            rank,
        }
    }

    /// This identity already voted on this target. Not an error.
    pub fn duplicate(total_points: i64, rank: String) -> Self {
        Self {
            accepted: false,
            already_voted: true,
            points_added: 0,
            total_points,
            rank,
        }
    }
}

/// Read-only reputation snapshot for a visitor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterStatus {
    pub total_points: i64,
    pub rank: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_type_parse_is_lenient() {
        assert_eq!(TargetType::parse("  Review "), Some(TargetType::Review));
        assert_eq!(TargetType::parse("POST"), Some(TargetType::Post));
        assert_eq!(TargetType::parse("comment"), None);
        assert_eq!(TargetType::parse(""), None);
    }
}
