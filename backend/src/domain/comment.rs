//! Comment data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::announcement::AnnouncementId;
use super::ownership::{patch_text, OwnedResource, SentinelPatch};
use super::user::UserId;

/// Stable comment identifier, assigned by the store on creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comment left on an announcement.
///
/// ## Invariants
/// - `author_id` and `announcement_id` are immutable after creation.
/// - `created_at` is assigned by the store at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
    pub announcement_id: AnnouncementId,
}

impl OwnedResource for Comment {
    fn owner_id(&self) -> UserId {
        self.author_id
    }
}

/// Details supplied when commenting, before the store assigns id and
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub author_id: UserId,
    pub announcement_id: AnnouncementId,
}

/// Partial comment update; only the content is mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPatch {
    pub content: String,
}

impl SentinelPatch<Comment> for CommentPatch {
    fn merge_into(&self, target: &mut Comment) {
        patch_text(&mut target.content, &self.content);
    }
}
