//! Announcement API handlers.
//!
//! Reads are public; mutations require a bearer credential and, beyond
//! creation, ownership of the listing. A non-owner is told "announcement not
//! found", not "forbidden", so the listing's existence leaks nothing.

use actix_web::{delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{PageRequest, SearchFilters};
use crate::domain::{Announcement, AnnouncementId, AnnouncementPatch, Error, NewAnnouncement, UserId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

const DEFAULT_PAGE_LIMIT: usize = 10;

/// Listing as serialised on the wire; the category travels as `type`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnnouncementResponse {
    pub id: AnnouncementId,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: String,
    pub user_id: UserId,
    pub comment_count: i64,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(value: Announcement) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            price: value.price,
            address: value.address,
            area: value.area,
            rooms_count: value.rooms_count,
            description: value.description,
            user_id: value.user_id,
            comment_count: value.comment_count,
        }
    }
}

/// Body for posting a listing.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AnnouncementCreateRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i64,
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    pub description: String,
}

/// Body for patching a listing; sentinel values skip their field.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AnnouncementPatchRequest {
    #[serde(rename = "type")]
    #[schema(example = "string")]
    pub kind: String,
    pub price: i64,
    #[schema(example = "string")]
    pub address: String,
    pub area: f64,
    pub rooms_count: i32,
    #[schema(example = "string")]
    pub description: String,
}

impl From<AnnouncementPatchRequest> for AnnouncementPatch {
    fn from(value: AnnouncementPatchRequest) -> Self {
        Self {
            kind: value.kind,
            price: value.price,
            address: value.address,
            area: value.area,
            rooms_count: value.rooms_count,
            description: value.description,
        }
    }
}

/// Search filters and pagination window, all optional.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Exact category match.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Exact room count match.
    pub rooms_count: Option<i32>,
    /// Inclusive lower price bound.
    pub price_from: Option<i64>,
    /// Inclusive upper price bound.
    pub price_until: Option<i64>,
    /// Page size, clamped server-side.
    pub limit: Option<usize>,
    /// Matches to skip before the page starts.
    pub offset: Option<usize>,
}

impl SearchQuery {
    fn into_parts(self) -> (SearchFilters, PageRequest) {
        let filters = SearchFilters {
            kind: self.kind,
            rooms_count: self.rooms_count,
            price_from: self.price_from,
            price_until: self.price_until,
        };
        let page = PageRequest {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: self.offset.unwrap_or(0),
        };
        (filters, page)
    }
}

/// One result page plus the pre-pagination match count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub total: usize,
    pub page: Vec<AnnouncementResponse>,
}

/// Post a listing owned by the caller.
#[utoipa::path(
    post,
    path = "/announcements",
    request_body = AnnouncementCreateRequest,
    responses(
        (status = 200, description = "Listing created", body = AnnouncementResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tag = "announcements",
    operation_id = "createAnnouncement"
)]
#[post("/announcements")]
pub async fn create(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<AnnouncementCreateRequest>,
) -> ApiResult<web::Json<AnnouncementResponse>> {
    let body = payload.into_inner();
    let draft = NewAnnouncement {
        kind: body.kind,
        price: body.price,
        address: body.address,
        area: body.area,
        rooms_count: body.rooms_count,
        description: body.description,
        user_id: user.0,
    };
    let created = state.listings.create(draft).await?;
    Ok(web::Json(created.into()))
}

/// Filter and paginate the listing collection. Public.
#[utoipa::path(
    get,
    path = "/announcements",
    params(SearchQuery),
    responses(
        (status = 200, description = "Result page", body = SearchResponse)
    ),
    tag = "announcements",
    operation_id = "searchAnnouncements"
)]
#[get("/announcements")]
pub async fn search(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<SearchResponse>> {
    let (filters, page) = query.into_inner().into_parts();
    let result = state.listings.search(filters, page).await?;
    Ok(web::Json(SearchResponse {
        total: result.total,
        page: result.page.into_iter().map(Into::into).collect(),
    }))
}

/// Fetch a single listing. Public.
#[utoipa::path(
    get,
    path = "/announcements/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Listing", body = AnnouncementResponse),
        (status = 404, description = "No such listing", body = Error)
    ),
    tag = "announcements",
    operation_id = "getAnnouncement"
)]
#[get("/announcements/{id}")]
pub async fn get_one(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<AnnouncementResponse>> {
    let found = state
        .listings
        .get(AnnouncementId::new(path.into_inner()))
        .await?;
    Ok(web::Json(found.into()))
}

/// Owner-only partial update under the sentinel-skip rule.
#[utoipa::path(
    patch,
    path = "/announcements/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    request_body = AnnouncementPatchRequest,
    responses(
        (status = 200, description = "Listing updated", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Missing or not owned by the caller", body = Error)
    ),
    tag = "announcements",
    operation_id = "patchAnnouncement"
)]
#[patch("/announcements/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<AnnouncementPatchRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .listings
        .update(
            AnnouncementId::new(path.into_inner()),
            user.0,
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(MessageResponse::new(
        "announcement updated successfully",
    )))
}

/// Owner-only removal.
#[utoipa::path(
    delete,
    path = "/announcements/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Listing deleted", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Missing or not owned by the caller", body = Error)
    ),
    tag = "announcements",
    operation_id = "deleteAnnouncement"
)]
#[delete("/announcements/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .listings
        .delete(AnnouncementId::new(path.into_inner()), user.0)
        .await?;
    Ok(web::Json(MessageResponse::new(
        "announcement deleted successfully",
    )))
}
