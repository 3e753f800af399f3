//! # rv-api
//!
//! The web routing and orchestration layer for rusty-votes.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the voting routes.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under a different prefix if needed.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // The write path: one vote per (target, identity)
            .route("/ratings/vote", web::post().to(handlers::vote))
            // The caller's own reputation snapshot
            .route("/voters/me", web::get().to(handlers::voter_status))
            // The rank table, for presentation layers
            .route("/ranks", web::get().to(handlers::list_ranks)),
    );
}
