//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Accounts, Comments, Favourites, Listings};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub listings: Arc<dyn Listings>,
    pub comments: Arc<dyn Comments>,
    pub favourites: Arc<dyn Favourites>,
}

impl HttpState {
    /// Bundle the driving port implementations for the handlers.
    pub fn new(
        accounts: Arc<dyn Accounts>,
        listings: Arc<dyn Listings>,
        comments: Arc<dyn Comments>,
        favourites: Arc<dyn Favourites>,
    ) -> Self {
        Self {
            accounts,
            listings,
            comments,
            favourites,
        }
    }
}
