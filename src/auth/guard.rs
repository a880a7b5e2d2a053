use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use sqlx::SqlitePool;

use crate::auth::token::AuthKeys;
use crate::error::ApiError;
use crate::models::user::User;
use crate::services::profile_service;

const REJECT_REASON: &str = "token is missing or invalid";

/// The authenticated caller, loaded fresh from the database on every
/// request. Extraction fails with 401 unless the request carries a
/// `Authorization: Bearer <token>` header whose signature, expiry and
/// password epoch all check out.
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    SqlitePool: FromRef<S>,
    AuthKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized(REJECT_REASON))?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized(REJECT_REASON))?;
        // Some clients send the token with the JSON quotes still on.
        let token = token.trim().trim_matches('"');

        let keys = AuthKeys::from_ref(state);
        let claims = keys
            .decode(token)
            .map_err(|_| ApiError::unauthorized(REJECT_REASON))?;

        let pool = SqlitePool::from_ref(state);
        let user = profile_service::find_by_login(&pool, &claims.sub)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized(REJECT_REASON))?;
        if claims.ver != user.password_epoch {
            // Password changed after this token was issued.
            return Err(ApiError::unauthorized(REJECT_REASON));
        }

        Ok(AuthUser(user))
    }
}
