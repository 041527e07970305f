//! Shared wiring for endpoint integration tests.
//!
//! Tests run the real handler stack (routing, extractors, error mapping,
//! Argon2 hashing, JWT issuance) over in-memory fixture adapters.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App};
use serde_json::{json, Value};

use stockroom::domain::ports::{
    FixtureItemRepository, FixtureUserRepository, InMemoryItemCache, TokenIssuer,
};
use stockroom::domain::{AuthService, InventoryService};
use stockroom::inbound::http::items::{
    create_item, delete_item, get_item, list_items, update_item,
};
use stockroom::inbound::http::state::HttpState;
use stockroom::inbound::http::users::{login, refresh_token, signup};
use stockroom::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

/// Build handler state over fresh fixture adapters.
pub fn test_state() -> web::Data<HttpState> {
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
        b"endpoint-integration-secret",
        Duration::from_secs(900),
        Duration::from_secs(7 * 24 * 3600),
    ));
    let auth = Arc::new(AuthService::new(
        Arc::new(FixtureUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
    ));
    let inventory = Arc::new(InventoryService::new(
        Arc::new(FixtureItemRepository::new()),
        Arc::new(InMemoryItemCache::new()),
    ));
    web::Data::new(HttpState::new(auth, inventory, tokens))
}

/// Build an app exposing every endpoint, as the server wires them.
pub fn test_app(
    state: web::Data<HttpState>,
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
        .app_data(state)
        .service(signup)
        .service(login)
        .service(refresh_token)
        .service(list_items)
        .service(create_item)
        .service(get_item)
        .service(update_item)
        .service(delete_item)
}

/// Default signup payload used across scenarios.
pub fn signup_payload() -> Value {
    json!({
        "username": "ada",
        "email": "ada@example.com",
        "password": "correct horse battery staple",
        "user_type": "User",
        "first_name": "Ada",
        "last_name": "Lovelace",
    })
}
