//! Favourites session wrapper.
//!
//! The favourites ledger is client-held: the whole set rides in the session
//! cookie as a comma-separated id list and is reconstructed from scratch on
//! every request. This wrapper keeps handlers free of framework-specific
//! session calls.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, FavouriteSet};

pub(crate) const FAVOURITES_KEY: &str = "favourites";

/// Newtype wrapper exposing favourites-level session operations.
#[derive(Clone)]
pub struct FavouritesSession(Session);

impl FavouritesSession {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Reconstruct the favourites set from the cookie.
    ///
    /// An absent cookie yields an empty set; malformed entries are dropped
    /// by the parser.
    pub fn load(&self) -> Result<FavouriteSet, Error> {
        let raw = self
            .0
            .get::<String>(FAVOURITES_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.map_or_else(FavouriteSet::default, |encoded| {
            FavouriteSet::parse(&encoded)
        }))
    }

    /// Write the favourites set back into the cookie.
    pub fn store(&self, set: &FavouriteSet) -> Result<(), Error> {
        self.0
            .insert(FAVOURITES_KEY, set.encode())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }
}

impl FromRequest for FavouritesSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FavouritesSession::new) })
    }
}
