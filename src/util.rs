use std::time::Duration;

use http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::RelayConfig;

/// Load dotenv and initialize structured tracing based on RUST_LOG.
///
/// - Supports explicit env file paths via ENV_FILE or DOTENV_PATH
/// - Falls back to the default `.env` discovery
/// - Logs the source used; existing variables are never overwritten
pub fn init_tracing() {
    let mut env_source: String = "none".into();
    for key in ["ENV_FILE", "DOTENV_PATH"] {
        if let Ok(p) = std::env::var(key) {
            let p = p.trim();
            if !p.is_empty()
                && std::path::Path::new(p).is_file()
                && dotenvy::from_filename(p).is_ok()
            {
                env_source = format!("{p} ({key})");
                break;
            }
        }
    }

    if env_source == "none" {
        if let Ok(path) = dotenvy::dotenv() {
            env_source = path.display().to_string();
        }
    }

    // RUST_LOG may come from the env file loaded above
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".into());
    let subscriber = fmt().with_env_filter(EnvFilter::new(filter)).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Environment loaded from: {}", env_source);
}

/// Build the upstream HTTP client from the relay configuration.
///
/// The configured timeout bounds the whole exchange (connect, send, body read).
pub fn build_http_client(config: &RelayConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().timeout(config.request_timeout);

    let proxy = &config.proxy;
    if proxy.disabled {
        builder = builder.no_proxy();
    } else {
        if let Some(u) = &proxy.all {
            builder = builder.proxy(reqwest::Proxy::all(u)?);
        }
        if let Some(u) = &proxy.http {
            builder = builder.proxy(reqwest::Proxy::http(u)?);
        }
        if let Some(u) = &proxy.https {
            builder = builder.proxy(reqwest::Proxy::https(u)?);
        }
    }

    builder
        .user_agent(format!("chat-relay/{}", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Build the CORS layer for the configured origins.
///
/// Credentials are allowed, so wildcards cannot be sent literally: the
/// permissive case mirrors the request origin, and request headers are always
/// mirrored.
pub fn cors_layer(config: &RelayConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let mut vals = Vec::new();
        for o in &config.allowed_origins {
            match HeaderValue::from_str(o) {
                Ok(hv) => vals.push(hv),
                Err(_) => tracing::warn!(origin = %o, "ignoring invalid CORS origin"),
            }
        }
        AllowOrigin::list(vals)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(600))
}
