//! HTTP routes.

pub mod health;
pub mod password;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route(
            "/password/",
            get(password::show_form).post(password::submit_form),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
