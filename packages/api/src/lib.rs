//! HTTP surface for EdgeRevenue: a thin axum routing layer over the
//! repositories and the report aggregation engine. Every JSON response is
//! wrapped in the `{success, data?, error?}` envelope.

use axum::{Router, routing::get};
use state::{AppState, State};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod routes;
pub mod state;

pub use axum;

pub fn construct_router(state: Arc<State>) -> Router {
    let router: Router<AppState> = Router::new()
        .nest("/health", routes::health::routes())
        .nest("/integrations", routes::integrations::routes())
        .nest("/reports", routes::reports::routes())
        .nest("/alerts", routes::alerts::routes())
        .nest("/export", routes::export::routes())
        .nest("/users", routes::users::routes())
        .route("/pricing", get(routes::users::pricing));

    Router::new()
        .nest("/api", router)
        .with_state(state)
        .layer(CorsLayer::permissive())
}
