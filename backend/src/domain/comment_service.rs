//! Comment domain service.
//!
//! Creation and deletion keep the parent announcement's denormalized
//! `comment_count` in step with two separate single-entity writes. The pair
//! is deliberately not transactional — the source contract has no
//! multi-entity transactions — so a crash between the writes leaves the
//! count off by one. Known gap, documented rather than fixed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::announcement::AnnouncementId;
use crate::domain::comment::{Comment, CommentId, CommentPatch, NewComment};
use crate::domain::error::Error;
use crate::domain::ownership::{claim_owned, merge_owned};
use crate::domain::ports::{
    AnnouncementRepository, AnnouncementRepositoryError, CommentRepository,
    CommentRepositoryError, Comments,
};
use crate::domain::user::UserId;

/// Comment service implementing the [`Comments`] driving port.
#[derive(Clone)]
pub struct CommentService<C, A> {
    comments: Arc<C>,
    announcements: Arc<A>,
}

impl<C, A> CommentService<C, A> {
    /// Create a new service over the comment and announcement repositories.
    pub fn new(comments: Arc<C>, announcements: Arc<A>) -> Self {
        Self {
            comments,
            announcements,
        }
    }
}

fn map_comment_repo_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Missing { id } => {
            tracing::debug!(%id, "comment row vanished mid-mutation");
            Error::not_found("comment not found")
        }
        CommentRepositoryError::Storage { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

fn map_announcement_repo_error(error: AnnouncementRepositoryError) -> Error {
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

#[async_trait]
impl<C, A> Comments for CommentService<C, A>
where
    C: CommentRepository,
    A: AnnouncementRepository,
{
    async fn create(
        &self,
        announcement: AnnouncementId,
        author: UserId,
        content: String,
    ) -> Result<Comment, Error> {
        let mut parent = self
            .announcements
            .find_by_id(announcement)
            .await
            .map_err(map_announcement_repo_error)?
            .ok_or_else(|| Error::not_found("announcement not found"))?;

        let comment = self
            .comments
            .insert(NewComment {
                content,
                author_id: author,
                announcement_id: announcement,
            })
            .await
            .map_err(map_comment_repo_error)?;

        // Second, non-transactional write: bump the parent's counter.
        parent.comment_count += 1;
        self.announcements
            .update(&parent)
            .await
            .map_err(map_announcement_repo_error)?;
        Ok(comment)
    }

    async fn list(&self, announcement: AnnouncementId) -> Result<Vec<Comment>, Error> {
        self.announcements
            .find_by_id(announcement)
            .await
            .map_err(map_announcement_repo_error)?
            .ok_or_else(|| Error::not_found("announcement not found"))?;
        self.comments
            .list_by_announcement(announcement)
            .await
            .map_err(map_comment_repo_error)
    }

    async fn update(
        &self,
        id: CommentId,
        caller: UserId,
        patch: CommentPatch,
    ) -> Result<(), Error> {
        let found = self
            .comments
            .find_by_id(id)
            .await
            .map_err(map_comment_repo_error)?;
        let merged =
            merge_owned(found, caller, &patch).map_err(|err| err.into_not_found("comment"))?;
        self.comments
            .update(&merged)
            .await
            .map_err(map_comment_repo_error)
    }

    async fn delete(&self, id: CommentId, caller: UserId) -> Result<(), Error> {
        let found = self
            .comments
            .find_by_id(id)
            .await
            .map_err(map_comment_repo_error)?;
        let comment = claim_owned(found, caller).map_err(|err| err.into_not_found("comment"))?;

        // Decrement the parent while the comment row still exists; the
        // removal completes afterwards. A parent that is already gone is
        // tolerated as a dangling reference.
        if let Some(mut parent) = self
            .announcements
            .find_by_id(comment.announcement_id)
            .await
            .map_err(map_announcement_repo_error)?
        {
            parent.comment_count -= 1;
            self.announcements
                .update(&parent)
                .await
                .map_err(map_announcement_repo_error)?;
        }

        self.comments
            .delete(id)
            .await
            .map_err(map_comment_repo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::announcement::Announcement;
    use crate::domain::ports::{MockAnnouncementRepository, MockCommentRepository};
    use crate::domain::ErrorCode;
    use chrono::Utc;
    use mockall::Sequence;

    fn parent(count: i64) -> Announcement {
        Announcement {
            id: AnnouncementId::new(1),
            kind: "sale".into(),
            price: 100_000,
            address: "12 Abay Ave".into(),
            area: 54.5,
            rooms_count: 2,
            description: "two rooms".into(),
            user_id: UserId::new(7),
            comment_count: count,
        }
    }

    fn comment(id: i64, author: i64) -> Comment {
        Comment {
            id: CommentId::new(id),
            content: "nice place".into(),
            created_at: Utc::now(),
            author_id: UserId::new(author),
            announcement_id: AnnouncementId::new(1),
        }
    }

    #[tokio::test]
    async fn create_bumps_the_parent_counter() {
        let mut announcements = MockAnnouncementRepository::new();
        announcements
            .expect_find_by_id()
            .return_once(|_| Ok(Some(parent(3))));
        announcements
            .expect_update()
            .withf(|updated| updated.comment_count == 4)
            .return_once(|_| Ok(()));

        let mut comments = MockCommentRepository::new();
        comments
            .expect_insert()
            .withf(|new| new.content == "nice place" && new.author_id == UserId::new(9))
            .return_once(|new| {
                Ok(Comment {
                    id: CommentId::new(5),
                    content: new.content,
                    created_at: Utc::now(),
                    author_id: new.author_id,
                    announcement_id: new.announcement_id,
                })
            });

        let service = CommentService::new(Arc::new(comments), Arc::new(announcements));
        let created = service
            .create(AnnouncementId::new(1), UserId::new(9), "nice place".into())
            .await
            .expect("create succeeds");
        assert_eq!(created.id, CommentId::new(5));
    }

    #[tokio::test]
    async fn create_against_a_missing_announcement_is_not_found() {
        let mut announcements = MockAnnouncementRepository::new();
        announcements.expect_find_by_id().return_once(|_| Ok(None));
        let mut comments = MockCommentRepository::new();
        comments.expect_insert().times(0);

        let service = CommentService::new(Arc::new(comments), Arc::new(announcements));
        let err = service
            .create(AnnouncementId::new(404), UserId::new(9), "hello".into())
            .await
            .expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_decrements_the_parent_before_removing_the_comment() {
        let mut sequence = Sequence::new();
        let mut comments = MockCommentRepository::new();
        let mut announcements = MockAnnouncementRepository::new();

        comments
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(Some(comment(5, 9))));
        announcements
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(Some(parent(4))));
        announcements
            .expect_update()
            .withf(|updated| updated.comment_count == 3)
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(()));
        comments
            .expect_delete()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(()));

        let service = CommentService::new(Arc::new(comments), Arc::new(announcements));
        service
            .delete(CommentId::new(5), UserId::new(9))
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn delete_by_non_author_and_on_missing_id_fail_identically() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_id()
            .withf(|id| id.get() == 5)
            .return_once(|_| Ok(Some(comment(5, 9))));
        comments
            .expect_find_by_id()
            .withf(|id| id.get() == 99)
            .return_once(|_| Ok(None));
        comments.expect_delete().times(0);
        let mut announcements = MockAnnouncementRepository::new();
        announcements.expect_update().times(0);

        let service = CommentService::new(Arc::new(comments), Arc::new(announcements));
        let foreign = service
            .delete(CommentId::new(5), UserId::new(2))
            .await
            .expect_err("foreign author");
        let missing = service
            .delete(CommentId::new(99), UserId::new(2))
            .await
            .expect_err("missing id");
        assert_eq!(foreign, missing);
        assert_eq!(foreign.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_applies_the_sentinel_rule_to_content() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_id()
            .return_once(|_| Ok(Some(comment(5, 9))));
        comments
            .expect_update()
            .withf(|updated| updated.content == "nice place")
            .return_once(|_| Ok(()));
        let announcements = MockAnnouncementRepository::new();

        let service = CommentService::new(Arc::new(comments), Arc::new(announcements));
        service
            .update(
                CommentId::new(5),
                UserId::new(9),
                CommentPatch {
                    content: "string".into(),
                },
            )
            .await
            .expect("sentinel update is a no-op");
    }

    #[tokio::test]
    async fn list_on_a_missing_announcement_is_not_found() {
        let mut announcements = MockAnnouncementRepository::new();
        announcements.expect_find_by_id().return_once(|_| Ok(None));
        let comments = MockCommentRepository::new();

        let service = CommentService::new(Arc::new(comments), Arc::new(announcements));
        let err = service
            .list(AnnouncementId::new(404))
            .await
            .expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
