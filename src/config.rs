use std::time::Duration;

/// Chat Completions endpoint used when `UPSTREAM_CHAT_URL` is not set.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://aiportalapi.stu-platform.live/jpe/v1/chat/completions";

/// Model used when the caller does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Total upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Outbound proxy settings for the upstream HTTP client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    /// Disable all proxies, including system ones.
    pub disabled: bool,
    /// Proxy for all schemes.
    pub all: Option<String>,
    pub http: Option<String>,
    pub https: Option<String>,
}

/// Process-wide relay configuration.
///
/// Built once at startup and shared read-only with every request handler.
/// Tests construct it directly instead of going through the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Upstream bearer secret. `None` means `/api/chat` answers 500.
    pub api_key: Option<String>,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub upstream_url: String,
    pub default_model: String,
    pub request_timeout: Duration,
    pub bind_addr: String,
    pub proxy: ProxySettings,
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("allowed_origins", &self.allowed_origins)
            .field("upstream_url", &self.upstream_url)
            .field("default_model", &self.default_model)
            .field("request_timeout", &self.request_timeout)
            .field("bind_addr", &self.bind_addr)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            allowed_origins: Vec::new(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            proxy: ProxySettings::default(),
        }
    }
}

impl RelayConfig {
    /// Read configuration from the process environment.
    ///
    /// Environment:
    /// - OPENAI_API_KEY                 -> upstream bearer secret (optional at startup)
    /// - ALLOWED_ORIGINS                -> "*" or comma-separated origins
    /// - UPSTREAM_CHAT_URL              -> Chat Completions endpoint override
    /// - RELAY_HTTP_TIMEOUT_SECONDS     -> total upstream timeout (u64)
    /// - BIND_ADDR                      -> listen address
    /// - RELAY_NO_PROXY = 1|true|yes|on -> disable all proxies
    /// - RELAY_PROXY_URL                -> proxy for all schemes
    /// - HTTP_PROXY / http_proxy        -> HTTP proxy
    /// - HTTPS_PROXY / https_proxy      -> HTTPS proxy
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let request_timeout = non_blank("RELAY_HTTP_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let proxy = ProxySettings {
            disabled: non_blank("RELAY_NO_PROXY")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            all: non_blank("RELAY_PROXY_URL"),
            http: non_blank("HTTP_PROXY").or_else(|| non_blank("http_proxy")),
            https: non_blank("HTTPS_PROXY").or_else(|| non_blank("https_proxy")),
        };

        Self {
            api_key: non_blank("OPENAI_API_KEY"),
            allowed_origins: parse_origins(lookup("ALLOWED_ORIGINS").as_deref().unwrap_or("*")),
            upstream_url: non_blank("UPSTREAM_CHAT_URL")
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout,
            bind_addr: non_blank("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            proxy,
        }
    }

    /// Convenience for tests and embedding: a config pointing at `upstream_url`.
    pub fn with_upstream(upstream_url: impl Into<String>, api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            upstream_url: upstream_url.into(),
            ..Self::default()
        }
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

/// Split a comma-separated origin list. `*` anywhere yields the permissive (empty) list.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

fn is_truthy(v: &str) -> bool {
    let v = v.to_ascii_lowercase();
    v == "1" || v == "true" || v == "yes" || v == "on"
}
