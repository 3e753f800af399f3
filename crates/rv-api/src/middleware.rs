//! rusty-votes/crates/rv-api/src/middleware.rs
//!
//! Middleware for logging and traffic control.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Standard request logger. Output:
/// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

/// CORS policy. The content frontend is statically hosted on a different
/// origin, so the voting endpoints must accept cross-origin JSON posts.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_header()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}
