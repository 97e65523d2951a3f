//! Driving port for favourites resolution.

use async_trait::async_trait;

use crate::domain::announcement::Announcement;
use crate::domain::error::Error;
use crate::domain::favourites::FavouriteSet;

/// Favourites use-cases consumed by inbound adapters.
///
/// The set itself is client-held; the only server-side operation is
/// resolving its ids against the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Favourites: Send + Sync {
    /// Resolve each id against the store, in insertion order.
    ///
    /// Ids that no longer resolve are silently dropped; a stale favourite is
    /// not an error.
    async fn resolve(&self, set: &FavouriteSet) -> Result<Vec<Announcement>, Error>;
}
