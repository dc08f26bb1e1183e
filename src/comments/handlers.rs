use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{dto::PostCommentRequest, repo_types::Comment};
use crate::{
    auth::extractors::AuthUser,
    envelope::Envelope,
    error::{ApiError, PlainError},
    state::AppState,
};

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comment/getAll", get(list_comments))
        .route("/comment", post(post_comment))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, PlainError> {
    Ok(Json(state.comments.list().await?))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn post_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PostCommentRequest>,
) -> Result<Json<Envelope<Comment>>, ApiError> {
    if state.users.find_by_username(&payload.username).await?.is_none() {
        warn!(%user_id, "comment for unknown username");
        return Err(ApiError::UserNotFound);
    }

    let comment = Comment {
        id: Uuid::new_v4(),
        username: payload.username,
        content: payload.content,
        date: OffsetDateTime::now_utc(),
    };
    state.comments.insert(&comment).await?;

    info!(%user_id, comment_id = %comment.id, "comment posted");
    Ok(Json(Envelope::success(comment)))
}
