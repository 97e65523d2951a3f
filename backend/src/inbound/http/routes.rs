//! Route registration for the HTTP adapter.

use actix_web::web;

use super::{announcements, comments, favourites, health, users};

/// Register every API route on the given service config.
///
/// `HttpState`, `AccessTokens`, and `HealthState` must already be present as
/// app data, and the session middleware must wrap the app for the favourites
/// routes to function.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::login)
        .service(users::get_profile)
        .service(users::patch_profile)
        .service(announcements::create)
        .service(announcements::search)
        .service(announcements::get_one)
        .service(announcements::update)
        .service(announcements::remove)
        .service(comments::create)
        .service(comments::list)
        .service(comments::update)
        .service(comments::remove)
        .service(favourites::add)
        .service(favourites::remove)
        .service(favourites::list)
        .service(health::live)
        .service(health::ready);
}
