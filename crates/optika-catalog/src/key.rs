//! Stable identity keys for catalog items.

use optika_core::CatalogItem;

/// Derives the deduplication key for an item.
///
/// Candidates are tried in order: `slug`, `id`, `_id`, `attributes.slug`,
/// `attributes.sku`, `attributes.barcode`, `sku`, `barcode`, and finally the
/// synthetic `"<title>-<variantLabel>"`. Returns `None` only when all of them
/// are empty; such items cannot be deduplicated and are dropped.
#[must_use]
pub fn resolve_key(item: &CatalogItem) -> Option<String> {
    item.identity
        .in_priority_order()
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(str::to_owned)
        .or_else(|| synthetic_key(item))
}

fn synthetic_key(item: &CatalogItem) -> Option<String> {
    let title = item.title.as_deref().map(str::trim).unwrap_or_default();
    let variant = item
        .variant_label
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if title.is_empty() && variant.is_empty() {
        return None;
    }
    Some(format!("{title}-{variant}"))
}
