//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters;
//! driving ports ([`Accounts`], [`Listings`], [`Comments`], [`Favourites`])
//! are implemented by domain services and consumed by inbound adapters
//! through `Arc<dyn Trait>`.

mod accounts;
mod announcement_repository;
mod comment_repository;
mod comments;
mod favourites;
mod listings;
mod user_repository;

pub use accounts::Accounts;
#[cfg(test)]
pub use accounts::MockAccounts;
#[cfg(test)]
pub use announcement_repository::MockAnnouncementRepository;
pub use announcement_repository::{AnnouncementRepository, AnnouncementRepositoryError};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
pub use comments::Comments;
#[cfg(test)]
pub use comments::MockComments;
pub use favourites::Favourites;
#[cfg(test)]
pub use favourites::MockFavourites;
#[cfg(test)]
pub use listings::MockListings;
pub use listings::{Listings, PageRequest, SearchFilters, SearchPage, MAX_PAGE_LIMIT};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
