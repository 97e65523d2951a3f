//! Client-held favourites ledger.
//!
//! The set of favourite announcement ids lives entirely in the caller's
//! session cookie, encoded as comma-separated decimal integers in insertion
//! order. There is no server-side table and no process-wide state: every
//! request reconstructs the set from the cookie, mutates it, and writes it
//! back.

use super::announcement::AnnouncementId;
use super::error::Error;

/// Errors raised by favourites mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FavouritesError {
    /// The id was not present in the set.
    #[error("announcement {id} is not in the favourites list")]
    AlreadyRemoved { id: AnnouncementId },
}

impl From<FavouritesError> for Error {
    fn from(value: FavouritesError) -> Self {
        match value {
            FavouritesError::AlreadyRemoved { .. } => Self::not_found(value.to_string()),
        }
    }
}

/// Insertion-ordered set of favourite announcement ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSet {
    ids: Vec<AnnouncementId>,
}

impl FavouriteSet {
    /// Decode a set from its cookie representation.
    ///
    /// Malformed chunks are dropped rather than failing the whole request;
    /// the cookie is client-held and may have been tampered with.
    pub fn parse(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .filter_map(|chunk| chunk.trim().parse::<i64>().ok())
            .map(AnnouncementId::new)
            .collect();
        Self { ids }
    }

    /// Encode the set for storage in the cookie.
    pub fn encode(&self) -> String {
        let chunks: Vec<String> = self.ids.iter().map(|id| id.get().to_string()).collect();
        chunks.join(",")
    }

    /// Add an id; adding one already present is a successful no-op.
    pub fn add(&mut self, id: AnnouncementId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Remove an id; removing an absent id is an error.
    pub fn remove(&mut self, id: AnnouncementId) -> Result<(), FavouritesError> {
        let before = self.ids.len();
        self.ids.retain(|candidate| *candidate != id);
        if self.ids.len() == before {
            return Err(FavouritesError::AlreadyRemoved { id });
        }
        Ok(())
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[AnnouncementId] {
        &self.ids
    }

    /// Whether the set contains `id`.
    pub fn contains(&self, id: AnnouncementId) -> bool {
        self.ids.contains(&id)
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
