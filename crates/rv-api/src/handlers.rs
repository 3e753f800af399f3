//! # rv-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! voting service.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use rv_core::error::AppError;
use rv_core::models::VoteRequest;
use rv_core::ranks::RANKS;
use rv_core::service::VotingService;
use serde::Deserialize;
use serde_json::json;

/// State shared across all actix workers.
pub struct AppState {
    pub votes: VotingService,
}

/// JSON body of a vote submission. Fields default to values that fail
/// core validation, so a missing field surfaces as an actionable 400
/// rather than a deserializer error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteForm {
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default = "missing_value")]
    pub value: f64,
}

fn missing_value() -> f64 {
    f64::NAN
}

/// Casts a vote for the identity derived from the caller's signals.
pub async fn vote(
    data: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<VoteForm>,
) -> impl Responder {
    let (client_ip, user_agent) = client_signals(&req);
    let form = form.into_inner();

    let outcome = data
        .votes
        .cast_vote(VoteRequest {
            target_type: form.target_type,
            slug: form.slug,
            value: form.value,
            client_ip,
            user_agent,
        })
        .await;

    match outcome {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(AppError::Validation(msg)) => HttpResponse::BadRequest().json(json!({ "error": msg })),
        Err(err) => {
            log::error!("vote failed: {err}");
            // Opaque on purpose: storage details stay server-side
            HttpResponse::InternalServerError().json(json!({ "error": "vote failed" }))
        }
    }
}

/// Reputation snapshot for the caller's derived identity.
pub async fn voter_status(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let (client_ip, user_agent) = client_signals(&req);

    match data.votes.voter_status(&client_ip, &user_agent).await {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(err) => {
            log::error!("voter status lookup failed: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "lookup failed" }))
        }
    }
}

/// The full rank table, ascending by threshold.
pub async fn list_ranks() -> impl Responder {
    HttpResponse::Ok().json(RANKS)
}

/// Client ip and user-agent with the voting API's fallbacks: first
/// x-forwarded-for entry, then the transport peer address, then 0.0.0.0;
/// "unknown" when no user-agent is sent.
fn client_signals(req: &HttpRequest) -> (String, String) {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let client_ip = forwarded
        .or_else(|| req.peer_addr().map(|a| a.ip().to_string()))
        .unwrap_or_else(|| "0.0.0.0".to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string());

    (client_ip, user_agent)
}
