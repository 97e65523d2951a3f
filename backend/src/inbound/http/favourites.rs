//! Favourites API handlers.
//!
//! The ledger lives in the caller's session cookie, not in the store, so
//! these routes need no bearer credential. Add and remove rewrite the cookie;
//! list resolves the remembered ids against the store and silently drops any
//! that no longer exist.

use actix_web::{delete, get, post, web};

use crate::domain::{AnnouncementId, Error};
use crate::inbound::http::announcements::AnnouncementResponse;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::FavouritesSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Remember an announcement id; re-adding a present id is a no-op success.
#[utoipa::path(
    post,
    path = "/favourites/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Id remembered", body = MessageResponse)
    ),
    tag = "favourites",
    operation_id = "addFavourite"
)]
#[post("/favourites/{id}")]
pub async fn add(
    session: FavouritesSession,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let mut set = session.load()?;
    set.add(AnnouncementId::new(path.into_inner()));
    session.store(&set)?;
    Ok(web::Json(MessageResponse::new(
        "announcement added to favourites",
    )))
}

/// Forget an announcement id; removing an absent id fails.
#[utoipa::path(
    delete,
    path = "/favourites/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Id forgotten", body = MessageResponse),
        (status = 404, description = "Id not in the favourites list", body = Error)
    ),
    tag = "favourites",
    operation_id = "removeFavourite"
)]
#[delete("/favourites/{id}")]
pub async fn remove(
    session: FavouritesSession,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let mut set = session.load()?;
    set.remove(AnnouncementId::new(path.into_inner()))?;
    session.store(&set)?;
    Ok(web::Json(MessageResponse::new(
        "announcement removed from favourites",
    )))
}

/// Resolve the remembered ids against the store, dropping stale ones.
#[utoipa::path(
    get,
    path = "/favourites",
    responses(
        (status = 200, description = "Favourite listings still in the store", body = [AnnouncementResponse])
    ),
    tag = "favourites",
    operation_id = "listFavourites"
)]
#[get("/favourites")]
pub async fn list(
    state: web::Data<HttpState>,
    session: FavouritesSession,
) -> ApiResult<web::Json<Vec<AnnouncementResponse>>> {
    let set = session.load()?;
    let resolved = state.favourites.resolve(&set).await?;
    Ok(web::Json(resolved.into_iter().map(Into::into).collect()))
}
