//! In-memory repository adapter.
//!
//! Backs all three repository ports with `HashMap`s behind a single
//! `RwLock`. Identifiers are assigned monotonically starting at 1, per
//! entity kind. Each trait call takes the lock once, so individual
//! single-entity mutations are atomic; nothing spans two calls, matching the
//! no-multi-entity-transactions contract.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::announcement::{Announcement, AnnouncementId, NewAnnouncement};
use crate::domain::comment::{Comment, CommentId, NewComment};
use crate::domain::ports::{
    AnnouncementRepository, AnnouncementRepositoryError, CommentRepository,
    CommentRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::user::{NewUser, User, UserId};

const POISONED: &str = "store lock poisoned";

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i64, User>,
    announcements: HashMap<i64, Announcement>,
    comments: HashMap<i64, Comment>,
    next_user_id: i64,
    next_announcement_id: i64,
    next_comment_id: i64,
}

/// Shared in-memory store implementing every repository port.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, &'static str> {
        self.inner.read().map_err(|_| POISONED)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, &'static str> {
        self.inner.write().map_err(|_| POISONED)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            UserRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        if tables
            .users
            .values()
            .any(|existing| existing.username == user.username)
        {
            return Err(UserRepositoryError::DuplicateUsername {
                username: user.username,
            });
        }
        tables.next_user_id += 1;
        let id = tables.next_user_id;
        let user = User {
            id: UserId::new(id),
            username: user.username,
            phone: user.phone,
            password: user.password,
            name: user.name,
            city: user.city,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.read().map_err(|message| {
            UserRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        Ok(tables.users.get(&id.get()).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.read().map_err(|message| {
            UserRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            UserRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        let slot = tables
            .users
            .get_mut(&user.id.get())
            .ok_or(UserRepositoryError::Missing { id: user.id })?;
        *slot = user.clone();
        Ok(())
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryStore {
    async fn insert(
        &self,
        announcement: NewAnnouncement,
    ) -> Result<Announcement, AnnouncementRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            AnnouncementRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        tables.next_announcement_id += 1;
        let id = tables.next_announcement_id;
        let announcement = Announcement {
            id: AnnouncementId::new(id),
            kind: announcement.kind,
            price: announcement.price,
            address: announcement.address,
            area: announcement.area,
            rooms_count: announcement.rooms_count,
            description: announcement.description,
            user_id: announcement.user_id,
            comment_count: 0,
        };
        tables.announcements.insert(id, announcement.clone());
        Ok(announcement)
    }

    async fn find_by_id(
        &self,
        id: AnnouncementId,
    ) -> Result<Option<Announcement>, AnnouncementRepositoryError> {
        let tables = self.read().map_err(|message| {
            AnnouncementRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        Ok(tables.announcements.get(&id.get()).cloned())
    }

    async fn list(&self) -> Result<Vec<Announcement>, AnnouncementRepositoryError> {
        let tables = self.read().map_err(|message| {
            AnnouncementRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        let mut all: Vec<Announcement> = tables.announcements.values().cloned().collect();
        all.sort_by_key(|announcement| announcement.id);
        Ok(all)
    }

    async fn update(
        &self,
        announcement: &Announcement,
    ) -> Result<(), AnnouncementRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            AnnouncementRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        let slot = tables
            .announcements
            .get_mut(&announcement.id.get())
            .ok_or(AnnouncementRepositoryError::Missing {
                id: announcement.id,
            })?;
        *slot = announcement.clone();
        Ok(())
    }

    async fn delete(&self, id: AnnouncementId) -> Result<(), AnnouncementRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            AnnouncementRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        tables
            .announcements
            .remove(&id.get())
            .map(|_| ())
            .ok_or(AnnouncementRepositoryError::Missing { id })
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            CommentRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        tables.next_comment_id += 1;
        let id = tables.next_comment_id;
        let comment = Comment {
            id: CommentId::new(id),
            content: comment.content,
            created_at: Utc::now(),
            author_id: comment.author_id,
            announcement_id: comment.announcement_id,
        };
        tables.comments.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let tables = self.read().map_err(|message| {
            CommentRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        Ok(tables.comments.get(&id.get()).cloned())
    }

    async fn list_by_announcement(
        &self,
        announcement: AnnouncementId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let tables = self.read().map_err(|message| {
            CommentRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.announcement_id == announcement)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.id);
        Ok(comments)
    }

    async fn update(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            CommentRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        let slot = tables
            .comments
            .get_mut(&comment.id.get())
            .ok_or(CommentRepositoryError::Missing { id: comment.id })?;
        *slot = comment.clone();
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> Result<(), CommentRepositoryError> {
        let mut tables = self.write().map_err(|message| {
            CommentRepositoryError::Storage {
                message: message.into(),
            }
        })?;
        tables
            .comments
            .remove(&id.get())
            .map(|_| ())
            .ok_or(CommentRepositoryError::Missing { id })
    }
}
