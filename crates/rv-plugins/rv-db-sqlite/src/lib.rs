//! # rv-db-sqlite
//!
//! SQLite implementation of `VoteStore`. This module implements the data
//! mapping between the SQLite relational model and the `rv-core` domain
//! models.
//!
//! The UNIQUE constraints on `ratings.voter_key` and `voters.anon_id` are
//! load-bearing: a concurrent duplicate insert fails here and the service
//! degrades it to the already-voted outcome.

use async_trait::async_trait;
use rv_core::error::{AppError, Result};
use rv_core::models::{Rating, TargetType, Voter};
use rv_core::traits::VoteStore;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct SqliteVoteStore {
    pool: SqlitePool,
}

const CREATE_VOTERS: &str = "
CREATE TABLE IF NOT EXISTS voters (
    id          BLOB PRIMARY KEY,
    anon_id     TEXT NOT NULL UNIQUE,
    points      INTEGER NOT NULL DEFAULT 0,
    rank        TEXT NOT NULL,
    created_at  TEXT NOT NULL
)";

const CREATE_RATINGS: &str = "
CREATE TABLE IF NOT EXISTS ratings (
    id               BLOB PRIMARY KEY,
    target_type      TEXT NOT NULL,
    slug             TEXT NOT NULL,
    value            INTEGER NOT NULL,
    voter_key        TEXT NOT NULL UNIQUE,
    anon_id          TEXT NOT NULL,
    ip_hash          TEXT NOT NULL,
    user_agent_hash  TEXT NOT NULL,
    created_at       TEXT NOT NULL
)";

// Helpers for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

fn internal(err: sqlx::Error) -> AppError {
    AppError::Internal(err.to_string())
}

/// Unique-violation on insert is the canonical duplicate signal.
fn map_insert_err(entity: &str, err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("{entity} already exists"))
        }
        _ => internal(err),
    }
}

fn voter_from_row(row: &SqliteRow) -> Voter {
    Voter {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        anon_id: row.get("anon_id"),
        points: row.get("points"),
        rank: row.get("rank"),
        created_at: row.get("created_at"),
    }
}

fn rating_from_row(row: &SqliteRow) -> Result<Rating> {
    let kind: String = row.get("target_type");
    let target_type = TargetType::parse(&kind).ok_or_else(|| {
        AppError::Internal(format!("unrecognized target_type {kind:?} in ratings row"))
    })?;
    Ok(Rating {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        target_type,
        slug: row.get("slug"),
        value: row.get("value"),
        voter_key: row.get("voter_key"),
        anon_id: row.get("anon_id"),
        ip_hash: row.get("ip_hash"),
        user_agent_hash: row.get("user_agent_hash"),
        created_at: row.get("created_at"),
    })
}

impl SqliteVoteStore {
    /// Connects and bootstraps the schema. The pool is capped at one
    /// connection: SQLite serializes writers anyway, and it keeps
    /// `sqlite::memory:` databases coherent across acquires.
    pub async fn new(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(internal)?;

        sqlx::query(CREATE_VOTERS)
            .execute(&pool)
            .await
            .map_err(internal)?;
        sqlx::query(CREATE_RATINGS)
            .execute(&pool)
            .await
            .map_err(internal)?;

        log::debug!("vote store schema ready at {url}");
        Ok(Self { pool })
    }
}

#[async_trait]
impl VoteStore for SqliteVoteStore {
    async fn find_rating_by_voter_key(&self, voter_key: &str) -> Result<Option<Rating>> {
        let row = sqlx::query("SELECT * FROM ratings WHERE voter_key = ?")
            .bind(voter_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;

        row.as_ref().map(rating_from_row).transpose()
    }

    async fn create_rating(&self, rating: Rating) -> Result<Rating> {
        sqlx::query(
            "INSERT INTO ratings (id, target_type, slug, value, voter_key, anon_id, ip_hash, user_agent_hash, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(rating.id))
        .bind(rating.target_type.as_str())
        .bind(&rating.slug)
        .bind(rating.value)
        .bind(&rating.voter_key)
        .bind(&rating.anon_id)
        .bind(&rating.ip_hash)
        .bind(&rating.user_agent_hash)
        .bind(rating.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err("rating", e))?;

        Ok(rating)
    }

    async fn find_voter(&self, anon_id: &str) -> Result<Option<Voter>> {
        let row = sqlx::query("SELECT * FROM voters WHERE anon_id = ?")
            .bind(anon_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;

        Ok(row.as_ref().map(voter_from_row))
    }

    async fn create_voter(&self, voter: Voter) -> Result<Voter> {
        sqlx::query(
            "INSERT INTO voters (id, anon_id, points, rank, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(voter.id))
        .bind(&voter.anon_id)
        .bind(voter.points)
        .bind(&voter.rank)
        .bind(voter.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err("voter", e))?;

        Ok(voter)
    }

    async fn update_voter(&self, id: Uuid, points: i64, rank: &str) -> Result<Voter> {
        let result = sqlx::query("UPDATE voters SET points = ?, rank = ? WHERE id = ?")
            .bind(points)
            .bind(rank)
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("voter".into(), id.to_string()));
        }

        let row = sqlx::query("SELECT * FROM voters WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_one(&self.pool)
            .await
            .map_err(internal)?;

        Ok(voter_from_row(&row))
    }
}
