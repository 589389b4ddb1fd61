use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
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
    /// Base URL of the storefront REST API, without a trailing `/shop-products`.
    pub api_base: String,
    pub env: Environment,
    pub log_level: String,
    pub listings_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Number of items revealed per "load more" step.
    pub page_size: usize,
    /// Probe cap for an aggregation call under the default budget.
    pub max_probes: u32,
    /// Probe cap when a low-selectivity refinement (exact brand) is active.
    pub wide_max_probes: u32,
    /// Request limit multiplier applied to `page_size` under the wide budget.
    pub wide_limit_multiplier: usize,
    /// Preferred locale key when an upstream title is a per-locale object.
    pub title_locale: String,
}
