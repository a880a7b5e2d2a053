use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde_json::json;

use crate::error::ApiError;
use crate::extract::AppJson;
use crate::models::user::{ProfileResponse, RegisterRequest, SignInRequest};
use crate::services::{country_service, profile_service};
use crate::{validate, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/sign-in", post(sign_in))
}

async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Collisions win over validation: a taken login answers 409 even if
    // the rest of the payload is garbage.
    if profile_service::collision_exists(&state.pool, &req.login, &req.email, req.phone.as_deref())
        .await?
    {
        return Err(ApiError::conflict(
            "login, email or phone is already taken",
        ));
    }

    validate::login(&req.login)?;
    validate::email(&req.email)?;
    validate::password(&req.password)?;
    if !country_service::code_exists(&state.pool, &req.country_code).await? {
        return Err(ApiError::validation("unknown country code"));
    }
    if let Some(phone) = &req.phone {
        validate::phone(phone)?;
    }
    if let Some(image) = &req.image {
        validate::image(image)?;
    }

    let hash = bcrypt::hash(&req.password, state.bcrypt_cost)?;
    let user = profile_service::create(&state.pool, &req, &hash).await?;
    tracing::info!(login = %user.login, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "profile": ProfileResponse::from(user) })),
    ))
}

async fn sign_in(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignInRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = profile_service::find_by_login(&state.pool, &req.login)
        .await?
        .ok_or_else(|| ApiError::unauthorized("user with this login does not exist"))?;
    if !bcrypt::verify(&req.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("incorrect password"));
    }

    let token = state.auth.issue(&user.login, user.password_epoch)?;
    tracing::debug!(login = %user.login, "token issued");
    Ok(Json(json!({ "token": token })))
}
