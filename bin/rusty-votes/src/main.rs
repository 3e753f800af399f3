//! # rusty-votes Binary
//!
//! The entry point that assembles the application based on compile-time
//! features.

use actix_web::{web, App, HttpServer};
use rv_api::handlers::AppState;
use rv_api::middleware::{cors_policy, standard_middleware};
use rv_core::service::VotingService;
use std::sync::Arc;

// Feature-gated imports: swap plugins without touching the core
#[cfg(feature = "db-sqlite")]
use rv_db_sqlite::SqliteVoteStore;

#[cfg(feature = "identity-sha2")]
use rv_identity_sha2::Sha256IdentityDeriver;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:rusty_votes.db?mode=rwc".to_string());
    let bind = std::env::var("RV_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    // 1. Initialize the persistence gateway
    #[cfg(feature = "db-sqlite")]
    let store = SqliteVoteStore::new(&database_url).await?;

    // 2. Initialize the identity deriver
    #[cfg(feature = "identity-sha2")]
    let identity = Sha256IdentityDeriver;

    // 3. Wire the voting service and share it across workers
    let state = web::Data::new(AppState {
        votes: VotingService::new(Arc::new(store), Arc::new(identity)),
    });

    log::info!("rusty-votes listening on http://{bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(standard_middleware())
            .wrap(cors_policy())
            .configure(rv_api::configure_routes)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
