//! Bearer-token authentication for protected handlers.
//!
//! Handlers opt into authentication by taking a [`BearerIdentity`] parameter;
//! extraction verifies the `Authorization: Bearer …` header against the
//! token port and rejects the request with `401` before the handler runs.

use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::ports::TokenError;
use crate::domain::token::Identity;
use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// Verified identity of the caller, extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct BearerIdentity(Identity);

impl BearerIdentity {
    /// The verified identity claims.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Expired => Error::unauthorized("Access token expired"),
        TokenError::Invalid { .. } | TokenError::WrongTokenUse => {
            Error::unauthorized("Invalid access token")
        }
        TokenError::Signing { message } => Error::internal(message),
    }
}

fn extract_identity(req: &HttpRequest) -> Result<BearerIdentity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("authentication state not configured"))?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Missing bearer token"))?;
    let header = header
        .to_str()
        .map_err(|_| Error::unauthorized("Invalid authorization header"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("Invalid authorization header"))?;

    state
        .tokens
        .verify_access(token.trim())
        .map(BearerIdentity)
        .map_err(map_token_error)
}

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_identity(req))
    }
}

#[cfg(test)]
mod tests {
    //! Extractor behaviour against a stub token port.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        FixtureItemRepository, FixturePasswordHasher, FixtureUserRepository, InMemoryItemCache,
        TokenIssuer,
    };
    use crate::domain::token::{AccessToken, TokenPair};
    use crate::domain::user::{Role, UserId, Username};
    use crate::domain::{AuthService, InventoryService, User};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use rstest::rstest;

    struct StubTokenIssuer;

    impl TokenIssuer for StubTokenIssuer {
        fn mint_pair(&self, _user: &User) -> Result<TokenPair, TokenError> {
            Err(TokenError::signing("not used"))
        }

        fn refresh_access(&self, _refresh_token: &str) -> Result<AccessToken, TokenError> {
            Err(TokenError::invalid("not used"))
        }

        fn verify_access(&self, access_token: &str) -> Result<Identity, TokenError> {
            match access_token {
                "good-token" => Ok(Identity {
                    user_id: UserId::random(),
                    username: Username::new("ada").expect("valid username"),
                    role: Role::User,
                }),
                "expired-token" => Err(TokenError::expired()),
                "refresh-token" => Err(TokenError::wrong_token_use()),
                _ => Err(TokenError::invalid("unknown token")),
            }
        }
    }

    fn stub_state() -> web::Data<HttpState> {
        let tokens: Arc<dyn TokenIssuer> = Arc::new(StubTokenIssuer);
        let auth = Arc::new(AuthService::new(
            Arc::new(FixtureUserRepository::new()),
            Arc::new(FixturePasswordHasher),
            tokens.clone(),
        ));
        let inventory = Arc::new(InventoryService::new(
            Arc::new(FixtureItemRepository::new()),
            Arc::new(InMemoryItemCache::new()),
        ));
        web::Data::new(HttpState::new(auth, inventory, tokens))
    }

    async fn guarded(identity: BearerIdentity) -> HttpResponse {
        HttpResponse::Ok().body(identity.identity().username.to_string())
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some("Basic dXNlcjpwdw=="), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer expired-token"), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer refresh-token"), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer garbage"), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer good-token"), StatusCode::OK)]
    #[actix_web::test]
    async fn extraction_enforces_bearer_verification(
        #[case] authorization: Option<&str>,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(
            App::new()
                .app_data(stub_state())
                .route("/guarded", web::get().to(guarded)),
        )
        .await;

        let mut request = test::TestRequest::get().uri("/guarded");
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), expected);
    }

    #[actix_web::test]
    async fn verified_identity_reaches_the_handler() {
        let app = test::init_service(
            App::new()
                .app_data(stub_state())
                .route("/guarded", web::get().to(guarded)),
        )
        .await;

        let request = test::TestRequest::get()
            .uri("/guarded")
            .insert_header((header::AUTHORIZATION, "Bearer good-token"))
            .to_request();
        let response = test::call_service(&app, request).await;
        let body = test::read_body(response).await;
        assert_eq!(body, "ada");
    }
}
