use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Runtime settings for the marketplace client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    /// Pause between a successful gig submission and leaving the wizard.
    pub redirect_delay: Duration,
    pub thumbnail_timeout: Duration,
    /// Where the locked-account flag survives restarts. `None` keeps it in memory.
    pub account_state_path: Option<PathBuf>,
    pub cache: CacheConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            redirect_delay: Duration::from_millis(2000),
            thumbnail_timeout: Duration::from_millis(5000),
            account_state_path: None,
            cache: CacheConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load `.env` (if any) and read settings from the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_url: lookup("GRADWORK_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            redirect_delay: parse_duration(
                &lookup,
                "GRADWORK_REDIRECT_DELAY_MS",
                defaults.redirect_delay,
                Duration::from_millis,
            ),
            thumbnail_timeout: parse_duration(
                &lookup,
                "GRADWORK_THUMBNAIL_TIMEOUT_MS",
                defaults.thumbnail_timeout,
                Duration::from_millis,
            ),
            account_state_path: lookup("GRADWORK_ACCOUNT_STATE_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            cache: CacheConfig::from_lookup(&lookup),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// TTLs for the in-process response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub category_ttl: Duration,
    pub user_ttl: Duration,
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            category_ttl: Duration::from_secs(600), // 10 minutes
            user_ttl: Duration::from_secs(900),     // 15 minutes
            max_capacity: 1_000,
        }
    }
}

impl CacheConfig {
    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            category_ttl: parse_duration(
                lookup,
                "CACHE_TTL_CATEGORIES",
                defaults.category_ttl,
                Duration::from_secs,
            ),
            user_ttl: parse_duration(lookup, "CACHE_TTL_USERS", defaults.user_ttl, Duration::from_secs),
            max_capacity: defaults.max_capacity,
        }
    }
}

fn parse_duration<F>(lookup: &F, key: &str, default: Duration, unit: fn(u64) -> Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .map(unit)
        .unwrap_or(default)
}
