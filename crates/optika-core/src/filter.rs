use serde::{Deserialize, Serialize};

/// Ordering applied to a listing after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    BrandAsc,
    BrandDesc,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Newest => write!(f, "newest"),
            SortKey::Oldest => write!(f, "oldest"),
            SortKey::PriceAsc => write!(f, "price_asc"),
            SortKey::PriceDesc => write!(f, "price_desc"),
            SortKey::BrandAsc => write!(f, "brand_asc"),
            SortKey::BrandDesc => write!(f, "brand_desc"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "brand_asc" => Ok(SortKey::BrandAsc),
            "brand_desc" => Ok(SortKey::BrandDesc),
            other => Err(format!("unknown sort key \"{other}\"")),
        }
    }
}

/// The part of a [`FilterSpec`] that shapes what the backend is asked for and
/// which items are accumulated. A change here invalidates the aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterScope {
    pub category_aliases: Vec<String>,
    pub audience_allow_list: Option<Vec<String>>,
    pub stock_only: bool,
}

/// Immutable description of the listing a user asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category_aliases: Vec<String>,
    /// `None` means "any audience".
    pub audience_allow_list: Option<Vec<String>>,
    pub stock_only: bool,
    /// Matched case- and diacritic-insensitively.
    pub brand_exact: Option<String>,
    pub search_query: String,
    pub sort_key: SortKey,
}

impl FilterSpec {
    #[must_use]
    pub fn scope(&self) -> FilterScope {
        FilterScope {
            category_aliases: self.category_aliases.clone(),
            audience_allow_list: self.audience_allow_list.clone(),
            stock_only: self.stock_only,
        }
    }

    /// `true` when `other` would need a fresh aggregation rather than a re-slice.
    #[must_use]
    pub fn scope_differs(&self, other: &FilterSpec) -> bool {
        self.category_aliases != other.category_aliases
            || self.audience_allow_list != other.audience_allow_list
            || self.stock_only != other.stock_only
    }

    /// Returns the brand filter when it is set to something non-blank.
    #[must_use]
    pub fn active_brand(&self) -> Option<&str> {
        self.brand_exact
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    /// Returns the trimmed search query, or `None` when blank.
    #[must_use]
    pub fn active_search(&self) -> Option<&str> {
        Some(self.search_query.trim()).filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_spec() -> FilterSpec {
        FilterSpec {
            category_aliases: vec!["sunglasses".to_string()],
            audience_allow_list: Some(vec!["women".to_string()]),
            stock_only: false,
            brand_exact: None,
            search_query: String::new(),
            sort_key: SortKey::Newest,
        }
    }

    #[test]
    fn sort_key_parses_snake_and_kebab_case() {
        assert_eq!("price_asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("brand-desc".parse::<SortKey>().unwrap(), SortKey::BrandDesc);
        assert_eq!(" Newest ".parse::<SortKey>().unwrap(), SortKey::Newest);
    }

    #[test]
    fn sort_key_rejects_unknown_value() {
        let err = "cheapest".parse::<SortKey>().unwrap_err();
        assert!(err.contains("cheapest"));
    }

    #[test]
    fn sort_key_display_matches_serde_name() {
        let json = serde_json::to_string(&SortKey::PriceDesc).unwrap();
        assert_eq!(json, format!("\"{}\"", SortKey::PriceDesc));
    }

    #[test]
    fn client_only_changes_do_not_alter_scope() {
        let a = base_spec();
        let mut b = base_spec();
        b.brand_exact = Some("Ray-Ban".to_string());
        b.search_query = "aviator".to_string();
        b.sort_key = SortKey::PriceAsc;
        assert!(!a.scope_differs(&b));
        assert_eq!(a.scope(), b.scope());
    }

    #[test]
    fn stock_view_change_alters_scope() {
        let a = base_spec();
        let mut b = base_spec();
        b.stock_only = true;
        assert!(a.scope_differs(&b));
    }

    #[test]
    fn audience_change_alters_scope() {
        let a = base_spec();
        let mut b = base_spec();
        b.audience_allow_list = None;
        assert!(a.scope_differs(&b));
    }

    #[test]
    fn blank_brand_and_search_are_inactive() {
        let mut spec = base_spec();
        spec.brand_exact = Some("   ".to_string());
        spec.search_query = "  ".to_string();
        assert!(spec.active_brand().is_none());
        assert!(spec.active_search().is_none());
    }
}
