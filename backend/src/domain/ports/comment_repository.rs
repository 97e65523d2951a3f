//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::announcement::AnnouncementId;
use crate::domain::comment::{Comment, CommentId, NewComment};

/// Errors raised by comment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentRepositoryError {
    /// The storage backend failed.
    #[error("comment storage failed: {message}")]
    Storage { message: String },
    /// No comment with the given id exists to update or delete.
    #[error("no comment with id {id}")]
    Missing { id: CommentId },
}

/// Port for comment storage and retrieval.
///
/// The adapter assigns both the id and the creation timestamp on insert, so
/// `created_at` is server time regardless of what the caller sends.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment, assigning its id and creation timestamp.
    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Fetch a comment by id.
    ///
    /// Lookup is by comment id alone; the parent announcement id in the
    /// request path does not narrow it. This mirrors the source contract.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Fetch all comments under an announcement, in id order.
    async fn list_by_announcement(
        &self,
        announcement: AnnouncementId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Replace an existing comment row.
    async fn update(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;

    /// Remove a comment row.
    async fn delete(&self, id: CommentId) -> Result<(), CommentRepositoryError>;
}
