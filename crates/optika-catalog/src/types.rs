//! Upstream record shape for `GET /shop-products`.
//!
//! ## Observed shape
//!
//! Rows reach the listing endpoint from three ingestion paths and no field is
//! guaranteed on any of them:
//!
//! - Storefront products entered by hand carry `slug`, `title`, `brand`,
//!   `category`, and usually `price`.
//! - Contact-lens variants share a parent `slug` pattern but add
//!   `variantLabel` or `attributes.power` / `attributes.packSize`.
//! - ERP imports often have only `sku` / `barcode`, a `name` instead of a
//!   `title`, and their category in `attributes.category` or `attributes.tags`.
//!
//! ### Loose scalars
//! `id`, `sku`, `barcode`, `price`, and `discountPrice` arrive as either JSON
//! numbers or strings (`"89.90"`, `"89,90"`). Every scalar is held as a
//! [`serde_json::Value`] and interpreted during normalization.
//!
//! ### `title`
//! Either a plain string or a per-locale object such as
//! `{"el": "Γυαλιά ηλίου", "en": "Sunglasses"}`.
//!
//! ### `attributes`
//! Usually an object, occasionally `null` or missing. Anything that is not an
//! object is treated as empty.

use serde::Deserialize;
use serde_json::Value;

/// One element of the listing response array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub slug: Value,
    #[serde(default)]
    pub id: Value,
    #[serde(default, rename = "_id")]
    pub legacy_id: Value,
    #[serde(default)]
    pub sku: Value,
    #[serde(default)]
    pub barcode: Value,

    #[serde(default)]
    pub title: Value,
    /// Display name used by ERP rows that have no `title`.
    #[serde(default)]
    pub name: Value,
    #[serde(default, rename = "variantLabel")]
    pub variant_label: Value,

    #[serde(default)]
    pub brand: Value,
    #[serde(default)]
    pub category: Value,
    #[serde(default)]
    pub audience: Value,
    #[serde(default)]
    pub color: Value,

    #[serde(default)]
    pub price: Value,
    #[serde(default, rename = "discountPrice")]
    pub discount_price: Value,

    #[serde(default, rename = "createdAt")]
    pub created_at: Value,
    #[serde(default, rename = "created_at")]
    pub created_at_snake: Value,

    #[serde(default)]
    pub attributes: Value,
}

impl RawItem {
    /// Builds a record from one array element. Elements that are not objects
    /// (or fail to decode) become an empty record so that the page length the
    /// offset cursor depends on is preserved.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Looks up a key in the `attributes` bag.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.as_object()?.get(key).filter(|v| !v.is_null())
    }
}

/// Interprets a loose scalar as a trimmed, non-empty string.
#[must_use]
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Interprets a scalar-or-array as a list of trimmed, non-empty strings.
#[must_use]
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}
