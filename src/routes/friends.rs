use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{AppJson, AppQuery};
use crate::models::friend::{FriendRequest, FriendResponse};
use crate::services::{friend_service, profile_service};
use crate::validate::{self, PageParams};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/friends/add", post(add_friend))
        .route("/api/friends/remove", post(remove_friend))
        .route("/api/friends", get(list_friends))
}

/// Adding is idempotent, and adding yourself is a silent no-op. Only an
/// unknown target login is an error.
async fn add_friend(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<FriendRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if profile_service::find_by_login(&state.pool, &req.login)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("user with this login was not found"));
    }
    if req.login != user.login
        && !friend_service::edge_exists(&state.pool, &user.login, &req.login).await?
    {
        friend_service::add(&state.pool, &user.login, &req.login).await?;
        tracing::debug!(user = %user.login, friend = %req.login, "friend added");
    }
    Ok(Json(json!({ "status": "ok" })))
}

async fn remove_friend(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<FriendRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if req.login != user.login {
        let removed = friend_service::remove(&state.pool, &user.login, &req.login).await?;
        if removed == 0 {
            return Err(ApiError::not_found("user with this login was not found"));
        }
    }
    Ok(Json(json!({ "status": "ok" })))
}

async fn list_friends(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
) -> Result<Json<Vec<FriendResponse>>, ApiError> {
    validate::page(&page)?;
    let mut rows =
        friend_service::list_page(&state.pool, &user.login, page.limit, page.offset).await?;
    // Pages are cut oldest-first, then shown most recent first.
    rows.reverse();
    Ok(Json(rows.into_iter().map(FriendResponse::from).collect()))
}
