//! Server construction and adapter wiring.

mod config;

pub use config::AppConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::warn;

#[cfg(debug_assertions)]
use stockroom::doc::ApiDoc;
use stockroom::domain::ports::{
    FixtureItemRepository, FixtureUserRepository, InMemoryItemCache, ItemCache, ItemRepository,
    TokenIssuer, UserRepository,
};
use stockroom::domain::{AuthService, InventoryService};
use stockroom::inbound::http::health::{live, ready, HealthState};
use stockroom::inbound::http::items::{
    create_item, delete_item, get_item, list_items, update_item,
};
use stockroom::inbound::http::state::HttpState;
use stockroom::inbound::http::users::{login, refresh_token, signup};
use stockroom::outbound::cache::RedisItemCache;
use stockroom::outbound::persistence::{DbPool, DieselItemRepository, DieselUserRepository};
use stockroom::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};
use stockroom::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const POOL_MAX_SIZE: u32 = 10;

/// Build repositories from configuration, falling back to in-memory fixtures
/// when no database is configured.
async fn build_repositories(
    config: &AppConfig,
) -> std::io::Result<(Arc<dyn UserRepository>, Arc<dyn ItemRepository>)> {
    match &config.database_url {
        Some(url) => {
            let pool = DbPool::connect(url, POOL_MAX_SIZE)
                .await
                .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
            Ok((
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselItemRepository::new(pool)),
            ))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory stores (dev only)");
            Ok((
                Arc::new(FixtureUserRepository::new()),
                Arc::new(FixtureItemRepository::new()),
            ))
        }
    }
}

/// Build the cache adapter, falling back to the in-memory cache when no
/// Redis instance is configured.
async fn build_cache(config: &AppConfig) -> std::io::Result<Arc<dyn ItemCache>> {
    match &config.redis_url {
        Some(url) => {
            let cache = RedisItemCache::connect(url, POOL_MAX_SIZE)
                .await
                .map_err(|err| std::io::Error::other(format!("redis pool: {err}")))?;
            Ok(Arc::new(cache))
        }
        None => {
            warn!("REDIS_URL not set; using in-memory cache (dev only)");
            Ok(Arc::new(InMemoryItemCache::new()))
        }
    }
}

/// Wire services and adapters into the handler state.
pub async fn build_state(config: &AppConfig) -> std::io::Result<web::Data<HttpState>> {
    let (users, items) = build_repositories(config).await?;
    let cache = build_cache(config).await?;

    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
        &config.jwt_secret,
        config.access_ttl,
        config.refresh_ttl,
    ));
    let auth = Arc::new(AuthService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
    ));
    let inventory = Arc::new(InventoryService::with_ttl(items, cache, config.cache_ttl));

    Ok(web::Data::new(HttpState::new(auth, inventory, tokens)))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(signup)
        .service(login)
        .service(refresh_token)
        .service(list_items)
        .service(create_item)
        .service(get_item)
        .service(update_item)
        .service(delete_item)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server from pre-built state.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: &AppConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
