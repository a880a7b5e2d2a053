use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::AppJson;
use crate::models::user::{ProfileResponse, UpdatePasswordRequest, UpdateProfileRequest};
use crate::services::{country_service, profile_service};
use crate::{validate, visibility, AppState};

// One reason for both "no such user" and "user is private": a 403 must
// not confirm that a login exists.
const PROFILE_DENIED: &str = "no access to this profile";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/me/profile", get(my_profile).patch(update_profile))
        .route("/api/me/updatePassword", post(update_password))
        .route("/api/profiles/:login", get(other_profile))
}

async fn my_profile(AuthUser(user): AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(user))
}

async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    if let Some(code) = &req.country_code {
        if !country_service::code_exists(&state.pool, code).await? {
            return Err(ApiError::validation("unknown country code"));
        }
    }
    if let Some(phone) = &req.phone {
        validate::phone(phone)?;
        if profile_service::phone_taken(&state.pool, phone, &user.login).await? {
            return Err(ApiError::conflict("phone number is already taken"));
        }
    }
    if let Some(image) = &req.image {
        validate::image(image)?;
    }

    profile_service::update(&state.pool, &user.login, &req).await?;
    let fresh = profile_service::find_by_login(&state.pool, &user.login)
        .await?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("user row missing after update")))?;
    Ok(Json(ProfileResponse::from(fresh)))
}

async fn update_password(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdatePasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Proof of the old password comes before judging the new one.
    if !bcrypt::verify(&req.old_password, &user.password_hash)? {
        return Err(ApiError::forbidden("old password does not match"));
    }
    validate::password(&req.new_password)?;

    let hash = bcrypt::hash(&req.new_password, state.bcrypt_cost)?;
    profile_service::update_password(&state.pool, &user.login, &hash).await?;
    tracing::info!(login = %user.login, "password updated, earlier tokens are now invalid");
    Ok(Json(json!({ "status": "ok" })))
}

async fn other_profile(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let target = profile_service::find_by_login(&state.pool, &login)
        .await?
        .ok_or_else(|| ApiError::forbidden(PROFILE_DENIED))?;
    if !visibility::profile_visible(&viewer.login, &target) {
        return Err(ApiError::forbidden(PROFILE_DENIED));
    }
    Ok(Json(ProfileResponse::from(target)))
}
