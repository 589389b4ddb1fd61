//! Deterministic ordering of aggregated items.

use std::cmp::Ordering;

use optika_core::{CatalogItem, SortKey};

use crate::alias;

/// Returns `items` ordered by `key` without mutating the input.
///
/// The sort is stable: items that compare equal keep their aggregation order.
/// Priceless items sort after every priced item under `price_asc` and before
/// them under `price_desc`. Items without a brand sort as an empty brand.
#[must_use]
pub fn sort_items<'a, I>(items: I, key: SortKey) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    let mut sorted: Vec<&CatalogItem> = items.into_iter().collect();

    match key {
        SortKey::Newest => sorted.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms)),
        SortKey::Oldest => sorted.sort_by(|a, b| a.created_at_ms.cmp(&b.created_at_ms)),
        SortKey::PriceAsc => sorted.sort_by(|a, b| compare_price(a, b)),
        SortKey::PriceDesc => sorted.sort_by(|a, b| compare_price(b, a)),
        SortKey::BrandAsc | SortKey::BrandDesc => {
            let mut keyed: Vec<(BrandKey, &CatalogItem)> =
                sorted.into_iter().map(|i| (BrandKey::of(i), i)).collect();
            if key == SortKey::BrandAsc {
                keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
            } else {
                keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
            }
            sorted = keyed.into_iter().map(|(_, i)| i).collect();
        }
    }

    sorted
}

fn compare_price(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    a.effective_price().total_cmp(&b.effective_price())
}

/// Case- and diacritic-insensitive brand ordering: primarily by the folded
/// form, then by the lowercased original so that `"Söhne"` and `"Sohne"` still
/// order deterministically.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct BrandKey {
    folded: String,
    lowered: String,
}

impl BrandKey {
    fn of(item: &CatalogItem) -> Self {
        let brand = item.brand.as_deref().unwrap_or_default();
        Self {
            folded: alias::normalize(brand),
            lowered: brand.to_lowercase(),
        }
    }
}
