//! HTTP adapter: actix-web handlers and their supporting plumbing.
//!
//! Handlers depend on the domain only through the driving ports bundled in
//! [`state::HttpState`]; everything framework-specific (extractors, error
//! mapping, session access) lives here.

pub mod announcements;
pub mod auth;
pub mod comments;
pub mod error;
pub mod favourites;
pub mod health;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod state;
pub mod users;

#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use state::HttpState;
