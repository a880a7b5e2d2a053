use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod auth;
pub mod countries;
pub mod friends;
pub mod posts;
pub mod profile;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .merge(auth::router())
        .merge(profile::router())
        .merge(friends::router())
        .merge(posts::router())
        .merge(countries::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
