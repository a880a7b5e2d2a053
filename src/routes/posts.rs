use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{AppJson, AppQuery};
use crate::models::post::{CreatePostRequest, PostResponse, PostRow};
use crate::services::{friend_service, post_service, profile_service};
use crate::validate::{self, PageParams};
use crate::{visibility, AppState};

const POST_NOT_FOUND: &str = "post not found";
// Same status as a missing post: a 404 must not confirm that a post id
// exists.
const POST_DENIED: &str = "no access to this post";
const FEED_DENIED: &str = "no access to this feed";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/posts/new", post(create_post))
        .route("/api/feed/my", get(my_feed))
        .route("/api/posts/feed/:login", get(user_feed))
        .route("/api/posts/:post_id", get(get_post))
        .route("/api/posts/:post_id/like", get(like_post))
        .route("/api/posts/:post_id/dislike", get(dislike_post))
}

async fn create_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    validate::post_content(&req.content)?;
    validate::post_tags(&req.tags)?;

    // The author's visibility at creation time sticks to the post; later
    // profile changes do not rewrite it.
    let post =
        post_service::create(&state.pool, &user.login, user.is_public, &req.content, &req.tags)
            .await?;
    tracing::debug!(author = %user.login, post_id = %post.id, "post created");
    Ok(Json(post))
}

async fn get_post(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = post_service::get(&state.pool, &post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(POST_NOT_FOUND))?;
    if !visibility::post_visible(&viewer.login, &post) {
        return Err(ApiError::not_found(POST_DENIED));
    }
    Ok(Json(post.into_response()))
}

async fn my_feed(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageParams>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    validate::page(&page)?;
    let mut rows =
        post_service::feed_page(&state.pool, &user.login, page.limit, page.offset).await?;
    rows.reverse();
    Ok(Json(rows.into_iter().map(PostRow::into_response).collect()))
}

async fn user_feed(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(login): Path<String>,
    AppQuery(page): AppQuery<PageParams>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    validate::page(&page)?;
    let target = profile_service::find_by_login(&state.pool, &login)
        .await?
        .ok_or_else(|| ApiError::not_found(FEED_DENIED))?;
    let target_friends = friend_service::friend_logins(&state.pool, &target.login).await?;
    if !visibility::feed_visible(&viewer.login, &target, &target_friends) {
        return Err(ApiError::not_found(FEED_DENIED));
    }

    let mut rows =
        post_service::feed_page(&state.pool, &target.login, page.limit, page.offset).await?;
    rows.reverse();
    Ok(Json(rows.into_iter().map(PostRow::into_response).collect()))
}

async fn like_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    react(&state, &user.login, &post_id, true).await
}

async fn dislike_post(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    react(&state, &user.login, &post_id, false).await
}

/// Reacting needs the post to exist but not to be visible; private posts
/// take reactions from anyone holding the id.
async fn react(
    state: &AppState,
    login: &str,
    post_id: &str,
    is_like: bool,
) -> Result<Json<PostResponse>, ApiError> {
    if !post_service::exists(&state.pool, post_id).await? {
        return Err(ApiError::not_found(POST_NOT_FOUND));
    }
    post_service::react(&state.pool, post_id, login, is_like).await?;

    let post = post_service::get(&state.pool, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found(POST_NOT_FOUND))?;
    Ok(Json(post.into_response()))
}
