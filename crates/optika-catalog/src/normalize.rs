//! Normalization from raw listing rows to [`optika_core::CatalogItem`].
//!
//! Scalar interpretation is delegated to [`crate::parse`]; this module decides
//! which source each row came from and where each field is read from. After
//! this pass no consumer looks at [`RawItem`] again.

use optika_core::{CatalogItem, IdentityCandidates, SourceKind};

use crate::parse::{parse_epoch_millis, parse_price, resolve_title};
use crate::types::{scalar_string, string_list, RawItem};

/// Normalizes a raw listing row into a [`CatalogItem`].
///
/// `locale` selects which entry of a per-locale `title` object is used.
#[must_use]
pub fn normalize_item(raw: &RawItem, locale: &str) -> CatalogItem {
    let source_kind = detect_source_kind(raw);

    let identity = IdentityCandidates {
        slug: scalar_string(&raw.slug),
        id: scalar_string(&raw.id),
        legacy_id: scalar_string(&raw.legacy_id),
        attr_slug: attr_string(raw, "slug"),
        attr_sku: attr_string(raw, "sku"),
        attr_barcode: attr_string(raw, "barcode"),
        sku: scalar_string(&raw.sku),
        barcode: scalar_string(&raw.barcode),
    };

    let title = resolve_title(&raw.title, locale).or_else(|| resolve_title(&raw.name, locale));

    let mut audiences = string_list(&raw.audience);
    for key in ["audience", "audiences"] {
        if let Some(value) = raw.attribute(key) {
            audiences.extend(string_list(value));
        }
    }

    let created_at_ms = parse_epoch_millis(&raw.created_at)
        .or_else(|| parse_epoch_millis(&raw.created_at_snake))
        .unwrap_or(0);

    CatalogItem {
        identity,
        source_kind,
        title,
        variant_label: variant_label(raw),
        brand: scalar_string(&raw.brand).or_else(|| attr_string(raw, "brand")),
        color: scalar_string(&raw.color).or_else(|| attr_string(raw, "color")),
        category: scalar_string(&raw.category),
        attr_category: attr_string(raw, "category"),
        tags: raw.attribute("tags").map(string_list).unwrap_or_default(),
        audiences,
        price: parse_price(&raw.price),
        discount_price: parse_price(&raw.discount_price),
        created_at_ms,
    }
}

/// Lens variants carry a variant descriptor; ERP rows have no storefront
/// identity (`slug`/`title`) and are keyed by SKU or barcode.
fn detect_source_kind(raw: &RawItem) -> SourceKind {
    if variant_label(raw).is_some() {
        return SourceKind::LensVariant;
    }

    let has_storefront_identity = scalar_string(&raw.slug).is_some() || !raw.title.is_null();
    let has_erp_identity = scalar_string(&raw.sku).is_some()
        || scalar_string(&raw.barcode).is_some()
        || raw.attribute("erpCode").is_some();

    if !has_storefront_identity && has_erp_identity {
        SourceKind::ErpRow
    } else {
        SourceKind::Product
    }
}

/// `variantLabel` when present; otherwise composed from the lens attributes
/// `power` and `packSize`, e.g. `"-1.25 / 6"`.
fn variant_label(raw: &RawItem) -> Option<String> {
    if let Some(label) = scalar_string(&raw.variant_label) {
        return Some(label);
    }

    let parts: Vec<String> = ["power", "packSize"]
        .into_iter()
        .filter_map(|key| raw.attribute(key).and_then(scalar_string))
        .collect();

    (!parts.is_empty()).then(|| parts.join(" / "))
}

fn attr_string(raw: &RawItem, key: &str) -> Option<String> {
    raw.attribute(key).and_then(scalar_string)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
