//! Announcement (property listing) data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ownership::{patch_f64, patch_i32, patch_i64, patch_text, OwnedResource, SentinelPatch};
use super::user::UserId;

/// Stable announcement identifier, assigned by the store on creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct AnnouncementId(i64);

impl AnnouncementId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AnnouncementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Property listing posted by a user.
///
/// ## Invariants
/// - `user_id` references an existing user at creation time and never
///   changes afterwards.
/// - `comment_count` mirrors the number of live comments, maintained
///   incrementally by the comment service. The two writes involved are not
///   transactional, so the count is best effort.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub id: AnnouncementId,
    /// Free-text category; `type` on the wire.
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: String,
    pub user_id: UserId,
    pub comment_count: i64,
}

impl OwnedResource for Announcement {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Details supplied when posting a listing, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnouncement {
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: String,
    pub user_id: UserId,
}

/// Partial listing update.
///
/// All fields travel on the wire; the sentinel-skip rule (`"string"` for
/// text, zero for numbers) decides which apply. The owner and the comment
/// count are never patchable.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementPatch {
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: String,
}

impl SentinelPatch<Announcement> for AnnouncementPatch {
    fn merge_into(&self, target: &mut Announcement) {
        patch_text(&mut target.kind, &self.kind);
        patch_i64(&mut target.price, self.price);
        patch_text(&mut target.address, &self.address);
        patch_f64(&mut target.area, self.area);
        patch_i32(&mut target.rooms_count, self.rooms_count);
        patch_text(&mut target.description, &self.description);
    }
}
