//! Domain entities, the ownership-checked mutation protocol, and the
//! services implementing the driving ports.
//!
//! Everything here is transport agnostic: inbound adapters map requests into
//! these types and domain errors back out.

pub mod account_service;
pub mod announcement;
pub mod auth;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod favourites;
pub mod favourites_service;
pub mod listing_service;
pub mod ownership;
pub mod ports;
pub mod user;

pub use self::account_service::AccountService;
pub use self::announcement::{
    Announcement, AnnouncementId, AnnouncementPatch, NewAnnouncement,
};
pub use self::auth::AccessTokens;
pub use self::comment::{Comment, CommentId, CommentPatch, NewComment};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode};
pub use self::favourites::{FavouriteSet, FavouritesError};
pub use self::favourites_service::FavouritesService;
pub use self::listing_service::ListingService;
pub use self::ownership::{OwnedResource, OwnershipError, SentinelPatch, TEXT_SENTINEL};
pub use self::user::{NewUser, User, UserId, UserPatch, UserValidationError};
