//! Fine-grained filters the backend cannot apply.
//!
//! [`matches_scope`] covers the conditions that decide which items are
//! accumulated (stock view, category, audience); [`matches`] adds the
//! refinements applied over the accumulated set (exact brand, free text).

use optika_core::{CatalogItem, FilterScope, FilterSpec};

use crate::alias;

/// Keywords that mark an item as clearance stock, already folded.
const STOCK_KEYWORDS: [&str; 3] = ["stock", "stok", "στοκ"];

/// `true` when any category-like field contains a stock keyword.
#[must_use]
pub fn is_stock(item: &CatalogItem) -> bool {
    item.category_fields().any(|field| {
        let folded = alias::normalize(field);
        STOCK_KEYWORDS.iter().any(|kw| folded.contains(kw))
    })
}

/// Evaluates stock view, category membership, and audience, in that order.
#[must_use]
pub fn matches_scope(item: &CatalogItem, scope: &FilterScope) -> bool {
    if scope.stock_only && !is_stock(item) {
        return false;
    }

    if !scope.category_aliases.is_empty()
        && !item
            .category_fields()
            .any(|field| alias::matches(field, &scope.category_aliases))
    {
        return false;
    }

    match scope.audience_allow_list.as_deref() {
        Some(allowed) if !allowed.is_empty() => audience_allowed(item, allowed),
        _ => true,
    }
}

/// Evaluates every condition of `spec`; all active conditions must hold.
#[must_use]
pub fn matches(item: &CatalogItem, spec: &FilterSpec) -> bool {
    matches_scope(item, &spec.scope()) && matches_refinements(item, spec)
}

/// Exact brand and free-text search only.
#[must_use]
pub fn matches_refinements(item: &CatalogItem, spec: &FilterSpec) -> bool {
    if let Some(brand) = spec.active_brand() {
        let wanted = alias::normalize(brand);
        let actual = item.brand.as_deref().map(alias::normalize);
        if actual.as_deref() != Some(wanted.as_str()) {
            return false;
        }
    }

    match spec.active_search() {
        Some(query) => search_hit(item, &query.to_lowercase()),
        None => true,
    }
}

fn audience_allowed(item: &CatalogItem, allowed: &[String]) -> bool {
    let allowed: Vec<String> = allowed.iter().map(|a| alias::normalize(a)).collect();
    item.audiences.iter().any(|audience| {
        let folded = alias::normalize(audience);
        !folded.is_empty() && allowed.contains(&folded)
    })
}

/// Case-insensitive substring match over title, brand, and color.
fn search_hit(item: &CatalogItem, lowered_query: &str) -> bool {
    [
        item.title.as_deref(),
        item.brand.as_deref(),
        item.color.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(lowered_query))
}
