//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! endpoint from the inbound layer, the shared error schema, and the bearer
//! security scheme. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Item, TokenPair, UserProfile};
use crate::inbound::http::items::{DeleteResponse, ItemPayload};
use crate::inbound::http::users::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SignupRequest, SignupResponse,
};

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Stockroom API",
        description = "Inventory CRUD with JWT authentication and a read-through item cache."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::refresh_token,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Item,
        ItemPayload,
        DeleteResponse,
        TokenPair,
        UserProfile,
        SignupRequest,
        SignupResponse,
        LoginRequest,
        LoginResponse,
        RefreshRequest,
        RefreshResponse,
    )),
    tags(
        (name = "auth", description = "Signup, login, and token refresh"),
        (name = "items", description = "Inventory CRUD"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
