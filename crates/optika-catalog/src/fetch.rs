//! The seam between aggregation and the network.

use std::future::Future;

use optika_core::FilterScope;

use crate::error::CatalogError;
use crate::types::RawItem;

/// Coarse filters the backend understands. Each alias and audience value is
/// sent as its own repeated query parameter so the backend can OR-match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoarseParams {
    pub categories: Vec<String>,
    pub audiences: Vec<String>,
}

impl CoarseParams {
    #[must_use]
    pub fn from_scope(scope: &FilterScope) -> Self {
        Self {
            categories: scope.category_aliases.clone(),
            audiences: scope.audience_allow_list.clone().unwrap_or_default(),
        }
    }
}

/// One bounded request for `limit` rows starting at `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery<'a> {
    pub offset: usize,
    pub limit: usize,
    pub params: &'a CoarseParams,
}

/// Fetches one page of raw listing rows.
///
/// Implementations return [`CatalogError::MalformedResponse`] when the body
/// is not a JSON array; callers downgrade that to an empty page.
pub trait PageFetcher {
    fn fetch_page(
        &self,
        query: PageQuery<'_>,
    ) -> impl Future<Output = Result<Vec<RawItem>, CatalogError>> + Send;
}
