use serde::{Deserialize, Serialize};

/// Which ingestion path an upstream record came through. Each path populates
/// a different subset of identity and display fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A manually entered storefront product.
    #[default]
    Product,
    /// A contact-lens variant (one row per power/pack combination).
    LensVariant,
    /// A row imported from the ERP, often identified only by SKU or barcode.
    ErpRow,
}

/// Identity fields of an upstream record, kept separately so key resolution
/// can walk them in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityCandidates {
    pub slug: Option<String>,
    pub id: Option<String>,
    /// Document-store `_id`.
    pub legacy_id: Option<String>,
    pub attr_slug: Option<String>,
    pub attr_sku: Option<String>,
    pub attr_barcode: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
}

impl IdentityCandidates {
    /// Candidates in key-resolution priority order.
    #[must_use]
    pub fn in_priority_order(&self) -> [Option<&str>; 8] {
        [
            self.slug.as_deref(),
            self.id.as_deref(),
            self.legacy_id.as_deref(),
            self.attr_slug.as_deref(),
            self.attr_sku.as_deref(),
            self.attr_barcode.as_deref(),
            self.sku.as_deref(),
            self.barcode.as_deref(),
        ]
    }
}

/// A catalog record normalized once at the ingestion boundary. Every field
/// other than `source_kind` and `created_at_ms` may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub identity: IdentityCandidates,
    pub source_kind: SourceKind,
    /// Title resolved for the configured locale.
    pub title: Option<String>,
    /// Variant descriptor, e.g. a lens power or pack size.
    pub variant_label: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub attr_category: Option<String>,
    pub tags: Vec<String>,
    /// All audience values found on the record, top-level first.
    pub audiences: Vec<String>,
    pub price: Option<f64>,
    pub discount_price: Option<f64>,
    /// Creation time in epoch milliseconds; `0` when missing or unparseable.
    pub created_at_ms: i64,
}

impl CatalogItem {
    /// Category-like strings in lookup order: `category`, `attributes.category`,
    /// then each of `attributes.tags`.
    pub fn category_fields(&self) -> impl Iterator<Item = &str> {
        self.category
            .as_deref()
            .into_iter()
            .chain(self.attr_category.as_deref())
            .chain(self.tags.iter().map(String::as_str))
    }

    /// The price a shopper pays: the discount price when it is a positive
    /// finite number, else the list price under the same rule, else `+inf`.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        let usable = |p: Option<f64>| p.filter(|v| v.is_finite() && *v > 0.0);
        usable(self.discount_price)
            .or_else(|| usable(self.price))
            .unwrap_or(f64::INFINITY)
    }
}
