use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Human-facing environments get colored log output.
    #[must_use]
    pub fn ansi_logs(&self) -> bool {
        matches!(self, Environment::Development)
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
    pub scraper_request_timeout_secs: u64,
    pub scraper_connect_timeout_secs: u64,
    /// Lower bound of the randomized pre-request delay.
    pub scraper_min_delay_ms: u64,
    /// Upper bound (inclusive) of the randomized pre-request delay.
    pub scraper_max_delay_ms: u64,
    /// `0` means every URL of a batch is in flight at once.
    pub scraper_max_concurrent_urls: usize,
    pub cache_ttl_secs: u64,
    pub cache_sweep_interval_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    #[must_use]
    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_interval_secs)
    }

    /// Batch concurrency ceiling, or `None` when unbounded.
    #[must_use]
    pub fn max_concurrent_urls(&self) -> Option<usize> {
        (self.scraper_max_concurrent_urls > 0).then_some(self.scraper_max_concurrent_urls)
    }
}
