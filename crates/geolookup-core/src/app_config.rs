use crate::location::RankMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Log filter used when `GEOLOOKUP_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Test => "warn",
            Environment::Production => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the Nominatim-compatible provider, without the `/search` path.
    pub provider_url: String,
    /// Sent as `User-Agent`; the public Nominatim instance rejects anonymous clients.
    pub user_agent: String,
    /// Sent as `Accept-Language`, e.g. `"en-US"`.
    pub language: String,
    pub request_timeout_secs: u64,
    pub debounce_ms: u64,
    pub rank_mode: RankMode,
    pub result_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            log_level: Environment::Development.default_log_level().to_owned(),
            provider_url: crate::config::DEFAULT_PROVIDER_URL.to_owned(),
            user_agent: crate::config::DEFAULT_USER_AGENT.to_owned(),
            language: "en".to_owned(),
            request_timeout_secs: 10,
            debounce_ms: 400,
            rank_mode: RankMode::Global,
            result_limit: 10,
        }
    }
}
