//! Driving port for comment operations.

use async_trait::async_trait;

use crate::domain::announcement::AnnouncementId;
use crate::domain::comment::{Comment, CommentId, CommentPatch};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Comment use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Comments: Send + Sync {
    /// Comment on an existing announcement and bump its comment counter.
    async fn create(
        &self,
        announcement: AnnouncementId,
        author: UserId,
        content: String,
    ) -> Result<Comment, Error>;

    /// List comments under an announcement.
    async fn list(&self, announcement: AnnouncementId) -> Result<Vec<Comment>, Error>;

    /// Author-only partial update under the sentinel-skip rule.
    async fn update(
        &self,
        id: CommentId,
        caller: UserId,
        patch: CommentPatch,
    ) -> Result<(), Error>;

    /// Author-only removal; decrements the parent's comment counter.
    async fn delete(&self, id: CommentId, caller: UserId) -> Result<(), Error>;
}
