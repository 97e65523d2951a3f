//! Favourites resolution service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::announcement::Announcement;
use crate::domain::error::Error;
use crate::domain::favourites::FavouriteSet;
use crate::domain::ports::{AnnouncementRepository, AnnouncementRepositoryError, Favourites};

/// Favourites service implementing the [`Favourites`] driving port.
#[derive(Clone)]
pub struct FavouritesService<A> {
    announcements: Arc<A>,
}

impl<A> FavouritesService<A> {
    /// Create a new service over an announcement repository.
    pub fn new(announcements: Arc<A>) -> Self {
        Self { announcements }
    }
}

fn map_repo_error(error: AnnouncementRepositoryError) -> Error {
    Error::internal(format!("announcement repository error: {error}"))
}

#[async_trait]
impl<A: AnnouncementRepository> Favourites for FavouritesService<A> {
    async fn resolve(&self, set: &FavouriteSet) -> Result<Vec<Announcement>, Error> {
        let mut resolved = Vec::with_capacity(set.ids().len());
        for id in set.ids() {
            // Dangling favourites are dropped, not surfaced as errors.
            if let Some(announcement) = self
                .announcements
                .find_by_id(*id)
                .await
                .map_err(map_repo_error)?
            {
                resolved.push(announcement);
            }
        }
        Ok(resolved)
    }
}
