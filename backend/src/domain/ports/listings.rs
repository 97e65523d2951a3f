//! Driving port for announcement operations.

use async_trait::async_trait;

use crate::domain::announcement::{
    Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement,
};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Upper bound on the page size accepted by [`Listings::search`]; larger
/// requests are clamped rather than rejected.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Optional conjunctive filters over the announcement collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Exact match on the free-text category.
    pub kind: Option<String>,
    /// Exact match on the room count.
    pub rooms_count: Option<i32>,
    /// Inclusive lower price bound.
    pub price_from: Option<i64>,
    /// Inclusive upper price bound.
    pub price_until: Option<i64>,
}

/// Offset/limit pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

/// One page of search results plus the total match count before pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub total: usize,
    pub page: Vec<Announcement>,
}

/// Announcement use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Listings: Send + Sync {
    /// Post a new listing owned by `owner`.
    async fn create(&self, draft: NewAnnouncement) -> Result<Announcement, Error>;

    /// Fetch a listing by id. Public; no ownership involved.
    async fn get(&self, id: AnnouncementId) -> Result<Announcement, Error>;

    /// Owner-only partial update under the sentinel-skip rule.
    async fn update(
        &self,
        id: AnnouncementId,
        caller: UserId,
        patch: AnnouncementPatch,
    ) -> Result<(), Error>;

    /// Owner-only removal.
    async fn delete(&self, id: AnnouncementId, caller: UserId) -> Result<(), Error>;

    /// Filter and paginate the full collection.
    async fn search(&self, filters: SearchFilters, page: PageRequest)
        -> Result<SearchPage, Error>;
}
