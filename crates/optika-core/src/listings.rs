use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterSpec, SortKey};
use crate::ConfigError;

/// One configured listing page: the general shop, a category PLP, or the
/// contact-lens listing. All of them run the same aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPreset {
    pub name: String,
    #[serde(default)]
    pub category_aliases: Vec<String>,
    #[serde(default)]
    pub audience: Option<Vec<String>>,
    #[serde(default)]
    pub stock_only: bool,
    #[serde(default)]
    pub default_sort: SortKey,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ListingPreset {
    /// The starting filter for this listing, before any user refinement.
    #[must_use]
    pub fn initial_spec(&self) -> FilterSpec {
        FilterSpec {
            category_aliases: self.category_aliases.clone(),
            audience_allow_list: self.audience.clone(),
            stock_only: self.stock_only,
            brand_exact: None,
            search_query: String::new(),
            sort_key: self.default_sort,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListingsFile {
    pub listings: Vec<ListingPreset>,
}

impl ListingsFile {
    /// Finds a preset by case-insensitive name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ListingPreset> {
        self.listings
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Load and validate the listing presets from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_listings(path: &Path) -> Result<ListingsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ListingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_listings(&content)
}

/// Parse and validate listing presets from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text does not parse or fails validation.
pub fn parse_listings(content: &str) -> Result<ListingsFile, ConfigError> {
    let listings_file: ListingsFile =
        serde_yaml::from_str(content).map_err(ConfigError::ListingsFileParse)?;

    validate_listings(&listings_file)?;

    Ok(listings_file)
}

fn validate_listings(listings_file: &ListingsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for listing in &listings_file.listings {
        if listing.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "listing name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(listing.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate listing name: '{}'",
                listing.name
            )));
        }

        if listing.category_aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "listing '{}' has an empty category alias",
                listing.name
            )));
        }

        if let Some(audience) = &listing.audience {
            if audience.is_empty() || audience.iter().any(|a| a.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "listing '{}' has an empty audience entry; omit the field to allow any audience",
                    listing.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "listings_test.rs"]
mod tests;
