//! Comment API handlers.
//!
//! Comments hang off an announcement, and every comment route requires a
//! bearer credential, reads included. Update and delete address a comment by
//! its own id; the announcement segment in the path scopes the route, not the
//! lookup. Author-only mutations report "comment not found" whether the
//! comment is missing or owned by someone else.

use actix_web::{delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AnnouncementId, Comment, CommentId, CommentPatch, Error, UserId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Comment as serialised on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
    pub announcement_id: AnnouncementId,
}

impl From<Comment> for CommentResponse {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id,
            content: value.content,
            created_at: value.created_at,
            author_id: value.author_id,
            announcement_id: value.announcement_id,
        }
    }
}

/// Body for posting a comment.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CommentCreateRequest {
    pub content: String,
}

/// Body for patching a comment; the sentinel skips the update.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CommentPatchRequest {
    #[schema(example = "string")]
    pub content: String,
}

/// Comment on an announcement.
#[utoipa::path(
    post,
    path = "/announcements/{id}/comments",
    params(("id" = i64, Path, description = "Announcement id")),
    request_body = CommentCreateRequest,
    responses(
        (status = 200, description = "Comment posted", body = CommentResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such announcement", body = Error)
    ),
    tag = "comments",
    operation_id = "createComment"
)]
#[post("/announcements/{id}/comments")]
pub async fn create(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<CommentCreateRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let posted = state
        .comments
        .create(
            AnnouncementId::new(path.into_inner()),
            user.0,
            payload.into_inner().content,
        )
        .await?;
    Ok(web::Json(posted.into()))
}

/// List the comments under an announcement.
#[utoipa::path(
    get,
    path = "/announcements/{id}/comments",
    params(("id" = i64, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Comments", body = [CommentResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such announcement", body = Error)
    ),
    tag = "comments",
    operation_id = "listComments"
)]
#[get("/announcements/{id}/comments")]
pub async fn list(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<CommentResponse>>> {
    let comments = state
        .comments
        .list(AnnouncementId::new(path.into_inner()))
        .await?;
    Ok(web::Json(comments.into_iter().map(Into::into).collect()))
}

/// Author-only content update under the sentinel-skip rule.
#[utoipa::path(
    patch,
    path = "/announcements/{id}/comments/{comment_id}",
    params(
        ("id" = i64, Path, description = "Announcement id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentPatchRequest,
    responses(
        (status = 200, description = "Comment updated", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Missing or not authored by the caller", body = Error)
    ),
    tag = "comments",
    operation_id = "patchComment"
)]
#[patch("/announcements/{id}/comments/{comment_id}")]
pub async fn update(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
    payload: web::Json<CommentPatchRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (_, comment_id) = path.into_inner();
    state
        .comments
        .update(
            CommentId::new(comment_id),
            user.0,
            CommentPatch {
                content: payload.into_inner().content,
            },
        )
        .await?;
    Ok(web::Json(MessageResponse::new(
        "comment updated successfully",
    )))
}

/// Author-only removal; the parent's counter is decremented.
#[utoipa::path(
    delete,
    path = "/announcements/{id}/comments/{comment_id}",
    params(
        ("id" = i64, Path, description = "Announcement id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Missing or not authored by the caller", body = Error)
    ),
    tag = "comments",
    operation_id = "deleteComment"
)]
#[delete("/announcements/{id}/comments/{comment_id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (_, comment_id) = path.into_inner();
    state
        .comments
        .delete(CommentId::new(comment_id), user.0)
        .await?;
    Ok(web::Json(MessageResponse::new(
        "comment deleted successfully",
    )))
}
