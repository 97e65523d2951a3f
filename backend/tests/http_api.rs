//! End-to-end HTTP tests against the real services and in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use backend::domain::{
    AccessTokens, AccountService, CommentService, FavouritesService, ListingService,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::{routes, HttpState};
use backend::outbound::persistence::InMemoryStore;

async fn spawn_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let store = Arc::new(InMemoryStore::new());
    let tokens = AccessTokens::new("integration-secret");
    let state = HttpState::new(
        Arc::new(AccountService::new(store.clone(), tokens.clone())),
        Arc::new(ListingService::new(store.clone())),
        Arc::new(CommentService::new(store.clone(), store.clone())),
        Arc::new(FavouritesService::new(store)),
    );
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();

    test::init_service(
        App::new()
            .app_data(health_state)
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(tokens))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_name("session".into())
                    .cookie_secure(false)
                    .build(),
            )
            .configure(routes::configure),
    )
    .await
}

async fn register_and_login<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/users")
            .set_json(json!({
                "username": username,
                "phone": "+7 701 000 0000",
                "password": "secret",
                "name": "Test User",
                "city": "Almaty",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "signup for {username}");

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/users/login")
            .set_json(json!({"username": username, "password": "secret"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login for {username}");
    let body: Value = test::read_body_json(res).await;
    body["access_token"]
        .as_str()
        .expect("access token issued")
        .to_string()
}

async fn create_announcement<S, B>(app: &S, token: &str, kind: &str, price: i64) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/announcements")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "type": kind,
                "price": price,
                "address": "12 Abay Ave",
                "area": 54.5,
                "rooms_count": 2,
                "description": "Bright two-room flat",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "create announcement");
    let body: Value = test::read_body_json(res).await;
    body["id"].as_i64().expect("announcement id")
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

#[actix_web::test]
async fn signup_login_and_profile_round_trip() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/users/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "aliya");
    assert_eq!(body["city"], "Almaty");
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn duplicate_username_is_a_conflict() {
    let app = spawn_app().await;
    register_and_login(&app, "aliya").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/users")
            .set_json(json!({
                "username": "aliya",
                "phone": "1",
                "password": "pw",
                "name": "Other",
                "city": "Astana",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn login_failure_shape_does_not_leak_username_existence() {
    let app = spawn_app().await;
    register_and_login(&app, "aliya").await;

    let wrong_password = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/users/login")
            .set_json(json!({"username": "aliya", "password": "nope"}))
            .to_request(),
    )
    .await;
    let unknown_user = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/users/login")
            .set_json(json!({"username": "nobody", "password": "nope"}))
            .to_request(),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let first: Value = test::read_body_json(wrong_password).await;
    let second: Value = test::read_body_json(unknown_user).await;
    assert_eq!(first, second);
}

#[actix_web::test]
async fn profile_patch_applies_only_non_sentinel_fields() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/auth/users/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"phone": "string", "name": "string", "city": "Astana"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/users/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["phone"], "+7 701 000 0000");
    assert_eq!(body["name"], "Test User");
    assert_eq!(body["city"], "Astana");
}

#[actix_web::test]
async fn announcement_patch_skips_sentinels_and_keeps_the_owner() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;
    let id = create_announcement(&app, &token, "flat", 250_000).await;

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/announcements/{id}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "type": "string",
                "price": 0,
                "address": "string",
                "area": 0.0,
                "rooms_count": 3,
                "description": "Freshly renovated",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/announcements/{id}"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["type"], "flat");
    assert_eq!(body["price"], 250_000);
    assert_eq!(body["address"], "12 Abay Ave");
    assert_eq!(body["rooms_count"], 3);
    assert_eq!(body["description"], "Freshly renovated");
}

#[actix_web::test]
async fn foreign_owner_mutations_read_as_not_found() {
    let app = spawn_app().await;
    let owner = register_and_login(&app, "aliya").await;
    let intruder = register_and_login(&app, "bolat").await;
    let id = create_announcement(&app, &owner, "flat", 250_000).await;

    let patch = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/announcements/{id}"))
            .insert_header(("Authorization", format!("Bearer {intruder}")))
            .set_json(json!({
                "type": "string",
                "price": 0,
                "address": "string",
                "area": 0.0,
                "rooms_count": 0,
                "description": "hijacked",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);

    let delete = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/announcements/{id}"))
            .insert_header(("Authorization", format!("Bearer {intruder}")))
            .to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(delete).await;
    assert_eq!(body["message"], "announcement not found");

    // The listing survives untouched for its owner.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/announcements/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn comment_lifecycle_maintains_the_denormalised_counter() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;
    let id = create_announcement(&app, &token, "flat", 250_000).await;

    let mut comment_ids = Vec::new();
    for text in ["first", "second", "third"] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/announcements/{id}/comments"))
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({"content": text}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        comment_ids.push(body["id"].as_i64().expect("comment id"));
    }

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/announcements/{id}"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["comment_count"], 3);

    let first = comment_ids[0];
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/announcements/{id}/comments/{first}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/announcements/{id}"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["comment_count"], 2);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/announcements/{id}/comments"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn comment_listing_requires_a_credential() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;
    let id = create_announcement(&app, &token, "flat", 250_000).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/announcements/{id}/comments"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn foreign_author_comment_mutations_read_as_not_found() {
    let app = spawn_app().await;
    let author = register_and_login(&app, "aliya").await;
    let intruder = register_and_login(&app, "bolat").await;
    let id = create_announcement(&app, &author, "flat", 250_000).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/announcements/{id}/comments"))
            .insert_header(("Authorization", format!("Bearer {author}")))
            .set_json(json!({"content": "still available?"}))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    let comment_id = body["id"].as_i64().expect("comment id");

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/announcements/{id}/comments/{comment_id}"))
            .insert_header(("Authorization", format!("Bearer {intruder}")))
            .set_json(json!({"content": "mine now"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "comment not found");
}

#[actix_web::test]
async fn search_reports_the_total_before_pagination() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;
    for _ in 0..15 {
        create_announcement(&app, &token, "flat", 250_000).await;
    }
    for _ in 0..4 {
        create_announcement(&app, &token, "house", 900_000).await;
    }

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/announcements?type=flat&limit=10&offset=10")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["total"], 15);
    assert_eq!(body["page"].as_array().map(Vec::len), Some(5));
}

#[actix_web::test]
async fn search_price_bounds_are_inclusive() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;
    create_announcement(&app, &token, "flat", 100).await;
    create_announcement(&app, &token, "flat", 200).await;
    create_announcement(&app, &token, "flat", 300).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/announcements?price_from=100&price_until=200")
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["total"], 2);
}

#[actix_web::test]
async fn favourites_survive_in_the_cookie_and_drop_stale_ids() {
    let app = spawn_app().await;
    let token = register_and_login(&app, "aliya").await;
    let keeper = create_announcement(&app, &token, "flat", 250_000).await;
    let doomed = create_announcement(&app, &token, "flat", 300_000).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/favourites/{keeper}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res).expect("session cookie set");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/favourites/{doomed}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&res).unwrap_or(cookie);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/announcements/{doomed}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/favourites")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let ids: Vec<i64> = body
        .as_array()
        .expect("favourites array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![keeper]);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/favourites/{doomed}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn anonymous_mutations_are_uniformly_unauthorised() {
    let app = spawn_app().await;
    for request in [
        test::TestRequest::get().uri("/auth/users/me"),
        test::TestRequest::post()
            .uri("/announcements")
            .set_json(json!({
                "type": "flat",
                "price": 1,
                "address": "x",
                "area": 1.0,
                "rooms_count": 1,
                "description": "x",
            })),
        test::TestRequest::delete().uri("/announcements/1"),
        test::TestRequest::post()
            .uri("/announcements/1/comments")
            .set_json(json!({"content": "hi"})),
        test::TestRequest::get().uri("/announcements/1/comments"),
    ] {
        let res = test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn health_probes_answer() {
    let app = spawn_app().await;
    for uri in ["/health/live", "/health/ready"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "probe {uri}");
    }
}
