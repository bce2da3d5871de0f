//! Post Handlers
//!
//! Post creation, editing and the like toggle.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::User;
use crate::utils::{AppError, AppResult};
use shared::client::{PostCreateRequest, PostDetail, PostInfo, PostUpdateRequest, UserInfo};

/// Resolve the calling session to its user document
async fn caller_account(state: &ServerState, user: &CurrentUser) -> AppResult<User> {
    state
        .users()
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// POST /post - create a post owned by the caller
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<PostCreateRequest>,
) -> AppResult<Redirect> {
    if req.content.trim().is_empty() {
        return Err(AppError::validation("Post content must not be empty"));
    }

    let account = caller_account(&state, &user).await?;
    let author_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record missing id"))?;

    // Two writes, no rollback: a failure after the post insert leaves
    // the post outside the owner's list and surfaces as an error
    let post = state.posts().create(author_id.clone(), &req.content).await?;
    let post_id = post
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Post record missing id"))?;
    state.users().append_post(&author_id, post_id.clone()).await?;

    tracing::info!(author = %author_id, post = %post_id, "Post created");

    Ok(Redirect::to("/profile"))
}

/// GET /like/{id} - toggle the caller's membership in the post's like set
///
/// One endpoint serves both directions; calling it twice restores the
/// original state.
pub async fn like(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let account = caller_account(&state, &user).await?;
    let user_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record missing id"))?;

    let updated = state.posts().toggle_like(&id, user_id.clone()).await?;

    tracing::debug!(
        post = %id,
        user = %user_id,
        likes = updated.likes.len(),
        liked = updated.liked_by(&user_id),
        "Like toggled"
    );

    Ok(Redirect::to("/profile"))
}

/// GET /edit/{id} - fetch a post with its author for editing
pub async fn edit(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<PostDetail>> {
    let post = state
        .posts()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {} not found", id)))?;

    let author = state
        .users()
        .find_by_id(&post.author)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(PostDetail {
        post: PostInfo::from(&post),
        author: UserInfo::from(&author),
    }))
}

/// POST /update/{id} - overwrite a post's content
pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<PostUpdateRequest>,
) -> AppResult<Redirect> {
    if req.content.trim().is_empty() {
        return Err(AppError::validation("Post content must not be empty"));
    }

    state.posts().update_content(&id, &req.content).await?;

    tracing::info!(post = %id, "Post updated");

    Ok(Redirect::to("/profile"))
}
