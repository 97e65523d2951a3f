//! Bearer credential extraction for authenticated endpoints.
//!
//! Handlers that need a caller identity take an [`AuthenticatedUser`]
//! argument; extraction reads the `Authorization: Bearer` header and
//! resolves it through [`AccessTokens`]. A missing, malformed, or forged
//! credential surfaces the same uniform 401.

use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::{AccessTokens, Error, UserId};

/// Identity of the caller, resolved from the bearer credential.
///
/// Resolution proves the credential only; whether the user still exists in
/// the store is the handler's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

fn resolve_bearer(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let tokens = req
        .app_data::<web::Data<AccessTokens>>()
        .ok_or_else(|| Error::internal("access token service not configured"))?;
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer credential"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("invalid credentials"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
    tokens.resolve(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_bearer(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.to_string())
    }

    fn tokens() -> AccessTokens {
        AccessTokens::new("extractor-tests")
    }

    fn app_tokens(
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
            .app_data(web::Data::new(tokens))
            .route("/whoami", web::get().to(whoami))
    }

    #[actix_web::test]
    async fn valid_credential_resolves_the_caller() {
        let tokens = tokens();
        let credential = tokens.issue(UserId::new(5)).expect("issue");
        let app = test::init_service(app_tokens(tokens)).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {credential}")))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "5");
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let app = test::init_service(app_tokens(tokens())).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let app = test::init_service(app_tokens(tokens())).await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Basic dXNlcjpwdw=="))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn forged_credential_is_unauthorized() {
        let forged = AccessTokens::new("other-secret")
            .issue(UserId::new(5))
            .expect("issue");
        let app = test::init_service(app_tokens(tokens())).await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {forged}")))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
