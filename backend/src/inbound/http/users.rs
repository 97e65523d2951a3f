//! Account API handlers.
//!
//! ```text
//! POST  /auth/users        {"username":"aliya","phone":"...","password":"...","name":"...","city":"..."}
//! POST  /auth/users/login  {"username":"aliya","password":"..."}
//! GET   /auth/users/me
//! PATCH /auth/users/me     {"phone":"string","name":"string","city":"Astana"}
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub phone: String,
    pub password: String,
    pub name: String,
    pub city: String,
}

impl From<SignupRequest> for NewUser {
    fn from(value: SignupRequest) -> Self {
        Self {
            username: value.username,
            phone: value.phone,
            password: value.password,
            name: value.name,
            city: value.city,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Own-profile view; the stored password never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: UserId,
    pub username: String,
    pub phone: String,
    pub name: String,
    pub city: String,
}

impl From<User> for ProfileResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            phone: value.phone,
            name: value.name,
            city: value.city,
        }
    }
}

/// Profile patch body; all fields travel, sentinels skip.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ProfilePatchRequest {
    #[schema(example = "string")]
    pub phone: String,
    #[schema(example = "string")]
    pub name: String,
    #[schema(example = "string")]
    pub city: String,
}

impl From<ProfilePatchRequest> for UserPatch {
    fn from(value: ProfilePatchRequest) -> Self {
        Self {
            phone: value.phone,
            name: value.name,
            city: value.city,
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/auth/users",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error)
    ),
    tag = "users",
    operation_id = "signup"
)]
#[post("/auth/users")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.accounts.signup(payload.into_inner().into()).await?;
    Ok(web::Json(MessageResponse::new(
        "user registered successfully",
    )))
}

/// Verify credentials and issue a bearer token.
#[utoipa::path(
    post,
    path = "/auth/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tag = "users",
    operation_id = "login"
)]
#[post("/auth/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let access_token = state
        .accounts
        .login(&payload.username, &payload.password)
        .await?;
    Ok(web::Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}

/// Fetch the caller's own profile.
#[utoipa::path(
    get,
    path = "/auth/users/me",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User no longer exists", body = Error)
    ),
    tag = "users",
    operation_id = "getProfile"
)]
#[get("/auth/users/me")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<ProfileResponse>> {
    let profile = state.accounts.profile(user.0).await?;
    Ok(web::Json(profile.into()))
}

/// Partially update the caller's own profile under the sentinel-skip rule.
#[utoipa::path(
    patch,
    path = "/auth/users/me",
    request_body = ProfilePatchRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User no longer exists", body = Error)
    ),
    tag = "users",
    operation_id = "patchProfile"
)]
#[patch("/auth/users/me")]
pub async fn patch_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ProfilePatchRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .accounts
        .update_profile(user.0, payload.into_inner().into())
        .await?;
    Ok(web::Json(MessageResponse::new(
        "profile updated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAccounts, MockComments, MockFavourites, MockListings};
    use crate::domain::AccessTokens;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;
    use std::sync::Arc;

    fn state_with(accounts: MockAccounts) -> HttpState {
        HttpState::new(
            Arc::new(accounts),
            Arc::new(MockListings::new()),
            Arc::new(MockComments::new()),
            Arc::new(MockFavourites::new()),
        )
    }

    fn stored_user() -> User {
        User {
            id: UserId::new(1),
            username: "aliya".into(),
            phone: "+7 701 000 0000".into(),
            password: "secret".into(),
            name: "Aliya".into(),
            city: "Almaty".into(),
        }
    }

    fn test_app(
        state: HttpState,
        tokens: AccessTokens,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(tokens))
            .service(signup)
            .service(login)
            .service(get_profile)
            .service(patch_profile)
    }

    #[actix_web::test]
    async fn signup_conflict_surfaces_as_409() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_signup()
            .return_once(|_| Err(Error::conflict("username already taken")));

        let app = test::init_service(test_app(
            state_with(accounts),
            AccessTokens::new("users-tests"),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/auth/users")
            .set_json(SignupRequest {
                username: "aliya".into(),
                phone: "1".into(),
                password: "pw".into(),
                name: "A".into(),
                city: "Almaty".into(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
    }

    #[actix_web::test]
    async fn login_returns_a_bearer_token() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_login()
            .withf(|username, password| username == "aliya" && password == "secret")
            .return_once(|_, _| Ok("signed-token".into()));

        let app = test::init_service(test_app(
            state_with(accounts),
            AccessTokens::new("users-tests"),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/auth/users/login")
            .set_json(LoginRequest {
                username: "aliya".into(),
                password: "secret".into(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["access_token"], "signed-token");
        assert_eq!(body["token_type"], "bearer");
    }

    #[actix_web::test]
    async fn profile_requires_a_credential() {
        let app = test::init_service(test_app(
            state_with(MockAccounts::new()),
            AccessTokens::new("users-tests"),
        ))
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/auth/users/me").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn profile_omits_the_password() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_profile()
            .withf(|user| *user == UserId::new(1))
            .return_once(|_| Ok(stored_user()));

        let tokens = AccessTokens::new("users-tests");
        let credential = tokens.issue(UserId::new(1)).expect("issue");
        let app = test::init_service(test_app(state_with(accounts), tokens)).await;
        let req = test::TestRequest::get()
            .uri("/auth/users/me")
            .insert_header(("Authorization", format!("Bearer {credential}")))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["username"], "aliya");
        assert!(body.get("password").is_none());
    }

    #[actix_web::test]
    async fn patch_forwards_the_sentinel_fields_untouched() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_update_profile()
            .withf(|user, patch| {
                *user == UserId::new(1) && patch.phone == "string" && patch.city == "Astana"
            })
            .return_once(|_, _| Ok(()));

        let tokens = AccessTokens::new("users-tests");
        let credential = tokens.issue(UserId::new(1)).expect("issue");
        let app = test::init_service(test_app(state_with(accounts), tokens)).await;
        let req = test::TestRequest::patch()
            .uri("/auth/users/me")
            .insert_header(("Authorization", format!("Bearer {credential}")))
            .set_json(ProfilePatchRequest {
                phone: "string".into(),
                name: "string".into(),
                city: "Astana".into(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
