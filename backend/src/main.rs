//! Backend entry-point: wires configuration, services, and HTTP routes.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::SameSite;
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::{
    AccessTokens, AccountService, CommentService, FavouritesService, ListingService,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::{routes, HttpState};
use backend::outbound::persistence::InMemoryStore;
use backend::server::{BuildMode, Config};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let config =
        Config::from_env(BuildMode::from_debug_assertions()).map_err(std::io::Error::other)?;

    let store = Arc::new(InMemoryStore::new());
    let tokens = AccessTokens::new(&config.token_secret);
    let state = HttpState::new(
        Arc::new(AccountService::new(store.clone(), tokens.clone())),
        Arc::new(ListingService::new(store.clone())),
        Arc::new(CommentService::new(store.clone(), store.clone())),
        Arc::new(FavouritesService::new(store)),
    );

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let session_key = config.session_key.clone();
    let cookie_secure = config.cookie_secure;
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        App::new()
            .app_data(server_health_state.clone())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .wrap(session)
            .configure(routes::configure)
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
