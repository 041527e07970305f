//! Backend entry-point: wires adapters, REST endpoints, and OpenAPI docs.

mod server;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use server::AppConfig;
use stockroom::inbound::http::health::HealthState;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env()?;
    let health_state = web::Data::new(HealthState::new());
    let http_state = server::build_state(&config).await?;

    let server = server::create_server(health_state, http_state, &config)?;
    server.await
}
