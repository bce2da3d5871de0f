//! Profile Handler

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::client::{PostInfo, ProfileResponse, UserInfo};

/// GET /profile - the caller's account plus their posts, newest first
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ProfileResponse>> {
    let account = state
        .users()
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let author_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record missing id"))?;

    let posts = state.posts().find_by_author(&author_id).await?;

    Ok(Json(ProfileResponse {
        user: UserInfo::from(&account),
        posts: posts.iter().map(PostInfo::from).collect(),
    }))
}
