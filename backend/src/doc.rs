//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API. The document is exported via `cargo run --bin openapi-dump`
//! for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::announcements::{
    AnnouncementCreateRequest, AnnouncementPatchRequest, AnnouncementResponse, SearchResponse,
};
use crate::inbound::http::comments::{CommentCreateRequest, CommentPatchRequest, CommentResponse};
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::users::{
    LoginRequest, ProfilePatchRequest, ProfileResponse, SignupRequest, TokenResponse,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /auth/users/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Listings backend API",
        description = "HTTP interface for the classifieds listing service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::patch_profile,
        crate::inbound::http::announcements::create,
        crate::inbound::http::announcements::search,
        crate::inbound::http::announcements::get_one,
        crate::inbound::http::announcements::update,
        crate::inbound::http::announcements::remove,
        crate::inbound::http::comments::create,
        crate::inbound::http::comments::list,
        crate::inbound::http::comments::update,
        crate::inbound::http::comments::remove,
        crate::inbound::http::favourites::add,
        crate::inbound::http::favourites::remove,
        crate::inbound::http::favourites::list,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    ),
    components(schemas(
        Error,
        ErrorCode,
        MessageResponse,
        SignupRequest,
        LoginRequest,
        TokenResponse,
        ProfileResponse,
        ProfilePatchRequest,
        AnnouncementResponse,
        AnnouncementCreateRequest,
        AnnouncementPatchRequest,
        SearchResponse,
        CommentResponse,
        CommentCreateRequest,
        CommentPatchRequest,
    )),
    tags(
        (name = "users", description = "Registration, login, and own-profile management"),
        (name = "announcements", description = "Listing CRUD and search"),
        (name = "comments", description = "Comments scoped to an announcement"),
        (name = "favourites", description = "Client-held favourites ledger"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
