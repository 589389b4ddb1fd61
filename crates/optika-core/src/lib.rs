pub mod app_config;
pub mod config;
pub mod filter;
pub mod item;
pub mod listings;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{FilterScope, FilterSpec, SortKey};
pub use item::{CatalogItem, IdentityCandidates, SourceKind};
pub use listings::{load_listings, ListingPreset, ListingsFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read listings file {path}: {source}")]
    ListingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse listings file: {0}")]
    ListingsFileParse(#[source] serde_yaml::Error),

    #[error("listings validation failed: {0}")]
    Validation(String),
}
