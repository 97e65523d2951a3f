//! Port for announcement persistence.

use async_trait::async_trait;

use crate::domain::announcement::{Announcement, AnnouncementId, NewAnnouncement};

/// Errors raised by announcement repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnouncementRepositoryError {
    /// The storage backend failed.
    #[error("announcement storage failed: {message}")]
    Storage { message: String },
    /// No announcement with the given id exists to update or delete.
    #[error("no announcement with id {id}")]
    Missing { id: AnnouncementId },
}

/// Port for announcement storage and retrieval.
///
/// Each call is an atomic single-entity mutation. The comment counter
/// crosses two entities without a transaction by design; see the comment
/// service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Persist a new announcement, assigning its id.
    async fn insert(
        &self,
        announcement: NewAnnouncement,
    ) -> Result<Announcement, AnnouncementRepositoryError>;

    /// Fetch an announcement by id.
    async fn find_by_id(
        &self,
        id: AnnouncementId,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError>;

    /// Fetch the full collection, in id order.
    async fn list(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError>;

    /// Replace an existing announcement row.
    async fn update(&self, announcement: &Announcement)
        -> Result<(), AnnouncementRepositoryError>;

    /// Remove an announcement row.
    async fn delete(&self, id: AnnouncementId) -> Result<(), AnnouncementRepositoryError>;
}
