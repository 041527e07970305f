//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use stockroom::domain::DEFAULT_CACHE_TTL;

/// Default access token lifetime: 15 minutes.
const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);
/// Default refresh token lifetime: 7 days.
const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Runtime configuration resolved from the environment.
///
/// `DATABASE_URL` and `REDIS_URL` are optional: when absent the server runs
/// on in-memory adapters, which is intended for development only.
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub jwt_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub cache_ttl: Duration,
}

fn duration_from_env(name: &str, default: Duration) -> Duration {
    match env::var(name) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(var = name, value = %raw, "ignoring non-numeric duration");
                default
            }
        },
        Err(_) => default,
    }
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `BIND_ADDR` is unparseable, or when `JWT_SECRET` is absent
    /// in a release build. Debug builds fall back to an ephemeral secret with
    /// a warning, which invalidates all tokens on restart.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
            .parse::<SocketAddr>()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                let allow_dev = env::var("JWT_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!("JWT_SECRET not set; using an ephemeral secret (dev only)");
                    let mut secret = Vec::with_capacity(32);
                    secret.extend_from_slice(Uuid::new_v4().as_bytes());
                    secret.extend_from_slice(Uuid::new_v4().as_bytes());
                    secret
                } else {
                    return Err(std::io::Error::other(
                        "JWT_SECRET must be set in release builds",
                    ));
                }
            }
        };

        Ok(Self {
            bind_addr,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret,
            access_ttl: duration_from_env("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TTL),
            refresh_ttl: duration_from_env("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TTL),
            cache_ttl: duration_from_env("CACHE_TTL_SECS", DEFAULT_CACHE_TTL),
        })
    }
}
