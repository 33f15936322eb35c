use axum::{routing::get, Router};

use super::handlers;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/chart", get(handlers::chart))
        .route("/positions", get(handlers::positions))
        .route("/lunar", get(handlers::lunar))
        .route("/retrogrades", get(handlers::retrogrades))
        .route("/health", get(handlers::health))
}
