//! Announcement domain service.
//!
//! Owner-checked mutations plus in-memory search over the full collection.
//! Search offers no snapshot isolation: each call filters whatever the store
//! holds at that moment.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::announcement::{
    Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement,
};
use crate::domain::error::Error;
use crate::domain::ownership::{claim_owned, merge_owned};
use crate::domain::ports::{
    AnnouncementRepository, AnnouncementRepositoryError, Listings, PageRequest, SearchFilters,
    SearchPage, MAX_PAGE_LIMIT,
};
use crate::domain::user::UserId;

/// Announcement service implementing the [`Listings`] driving port.
#[derive(Clone)]
pub struct ListingService<A> {
    announcements: Arc<A>,
}

impl<A> ListingService<A> {
    /// Create a new service over an announcement repository.
    pub fn new(announcements: Arc<A>) -> Self {
        Self { announcements }
    }
}

fn map_repo_error(error: AnnouncementRepositoryError) -> Error {
    match error {
        AnnouncementRepositoryError::Missing { id } => {
            tracing::debug!(%id, "announcement row vanished mid-mutation");
            Error::not_found("announcement not found")
        }
        AnnouncementRepositoryError::Storage { message } => {
            Error::internal(format!("announcement repository error: {message}"))
        }
    }
}

impl SearchFilters {
    /// Conjunction of the optional equality/range checks.
    pub fn matches(&self, announcement: &Announcement) -> bool {
        if let Some(kind) = &self.kind {
            if announcement.kind != *kind {
                return false;
            }
        }
        if let Some(rooms) = self.rooms_count {
            if announcement.rooms_count != rooms {
                return false;
            }
        }
        if let Some(from) = self.price_from {
            if announcement.price < from {
                return false;
            }
        }
        if let Some(until) = self.price_until {
            if announcement.price > until {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl<A: AnnouncementRepository> Listings for ListingService<A> {
    async fn create(&self, draft: NewAnnouncement) -> Result<Announcement, Error> {
        self.announcements
            .insert(draft)
            .await
            .map_err(map_repo_error)
    }

    async fn get(&self, id: AnnouncementId) -> Result<Announcement, Error> {
        self.announcements
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("announcement not found"))
    }

    async fn update(
        &self,
        id: AnnouncementId,
        caller: UserId,
        patch: AnnouncementPatch,
    ) -> Result<(), Error> {
        let found = self
            .announcements
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?;
        let merged = merge_owned(found, caller, &patch)
            .map_err(|err| err.into_not_found("announcement"))?;
        self.announcements
            .update(&merged)
            .await
            .map_err(map_repo_error)
    }

    async fn delete(&self, id: AnnouncementId, caller: UserId) -> Result<(), Error> {
        let found = self
            .announcements
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?;
        claim_owned(found, caller).map_err(|err| err.into_not_found("announcement"))?;
        self.announcements.delete(id).await.map_err(map_repo_error)
    }

    async fn search(
        &self,
        filters: SearchFilters,
        page: PageRequest,
    ) -> Result<SearchPage, Error> {
        let all = self.announcements.list().await.map_err(map_repo_error)?;
        let matches: Vec<Announcement> = all
            .into_iter()
            .filter(|announcement| filters.matches(announcement))
            .collect();
        let total = matches.len();
        let limit = page.limit.min(MAX_PAGE_LIMIT);
        let page = matches.into_iter().skip(page.offset).take(limit).collect();
        Ok(SearchPage { total, page })
    }
}
