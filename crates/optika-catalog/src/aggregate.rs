//! Incremental aggregation of matching catalog items over offset paging.
//!
//! The backend filters coarsely, so one page can contain zero items the
//! client wants. [`aggregate`] keeps probing pages from an offset cursor until
//! it has accumulated `target` unique matches, runs out of probes, or the
//! backend returns a short page.
//!
//! The offset cursor always advances by the number of rows fetched, not the
//! number of rows kept. That is the only paging contract the backend offers.

use std::collections::HashSet;

use optika_core::{AppConfig, CatalogItem, FilterSpec};

use crate::error::CatalogError;
use crate::fetch::{CoarseParams, PageFetcher, PageQuery};
use crate::key::resolve_key;
use crate::normalize::normalize_item;

/// Accumulated result of probing the backend for one filter scope.
///
/// `unique_items` and `seen_keys` always have the same length, `next_offset`
/// never decreases, and `upstream_exhausted` never reverts to `false`.
#[derive(Debug, Clone, Default)]
pub struct AggregationState {
    unique_items: Vec<CatalogItem>,
    seen_keys: HashSet<String>,
    next_offset: usize,
    upstream_exhausted: bool,
    probe_count: u32,
}

impl AggregationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items accumulated so far, in first-seen order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.unique_items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.unique_items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unique_items.is_empty()
    }

    #[must_use]
    pub fn next_offset(&self) -> usize {
        self.next_offset
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.upstream_exhausted
    }

    /// Probes issued over the lifetime of this state, across all calls.
    #[must_use]
    pub fn probe_count(&self) -> u32 {
        self.probe_count
    }

    fn mark_exhausted(&mut self) {
        self.upstream_exhausted = true;
    }

    /// Appends `item` under `key` unless the key was already seen.
    fn insert(&mut self, key: String, item: CatalogItem) -> bool {
        if self.seen_keys.insert(key) {
            self.unique_items.push(item);
            true
        } else {
            false
        }
    }
}

/// Request size and probe cap for one aggregation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeBudget {
    pub request_limit: usize,
    pub max_probes: u32,
}

/// Tunable trade-off between round trips and request volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationTuning {
    pub page_size: usize,
    pub max_probes: u32,
    pub wide_max_probes: u32,
    pub wide_limit_multiplier: usize,
}

impl Default for AggregationTuning {
    fn default() -> Self {
        Self {
            page_size: 12,
            max_probes: 6,
            wide_max_probes: 12,
            wide_limit_multiplier: 5,
        }
    }
}

impl AggregationTuning {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            max_probes: config.max_probes.max(1),
            wide_max_probes: config.wide_max_probes.max(1),
            wide_limit_multiplier: config.wide_limit_multiplier.max(1),
        }
    }

    /// Budget for `spec`. An exact-brand filter keeps few items per page, so
    /// it gets wider requests and more probes.
    #[must_use]
    pub fn budget_for(&self, spec: &FilterSpec) -> ProbeBudget {
        if spec.active_brand().is_some() {
            ProbeBudget {
                request_limit: self.page_size.saturating_mul(self.wide_limit_multiplier),
                max_probes: self.wide_max_probes,
            }
        } else {
            ProbeBudget {
                request_limit: self.page_size,
                max_probes: self.max_probes,
            }
        }
    }
}

/// Whether an aggregation starts a listing or extends one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    /// First aggregation for a new filter scope.
    Replace,
    /// "Load more" on an existing scope.
    Append,
}

/// Everything one aggregation call needs besides the state and the fetcher.
#[derive(Debug, Clone, Copy)]
pub struct ProbePlan<'a> {
    pub params: &'a CoarseParams,
    /// Stop once this many counted items are held in total.
    pub target: usize,
    pub budget: ProbeBudget,
    pub mode: AggregationMode,
    /// Locale used when normalizing per-locale titles.
    pub locale: &'a str,
}

/// What a single aggregation call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationReport {
    pub probes: u32,
    pub added: usize,
}

/// Probes the backend until `plan.target` unique matches are held, the probe
/// budget is spent, or the backend is exhausted.
///
/// Every accumulated item counts toward the target. See [`aggregate_until`]
/// for the general form.
///
/// # Errors
///
/// Same as [`aggregate_until`].
pub async fn aggregate<F, P>(
    state: &mut AggregationState,
    fetcher: &F,
    plan: &ProbePlan<'_>,
    predicate: P,
) -> Result<AggregationReport, CatalogError>
where
    F: PageFetcher,
    P: Fn(&CatalogItem) -> bool,
{
    aggregate_until(state, fetcher, plan, predicate, |_| true).await
}

/// Probes the backend until `plan.target` held items also satisfy `counts`,
/// the probe budget is spent, or the backend is exhausted.
///
/// Rows are normalized, tested with `keep`, keyed with [`resolve_key`], and
/// appended when the key is new. `counts` only decides which held items move
/// the loop toward its target, so the state can hold a superset of what the
/// caller will show. Rows without a key are dropped. Once the target is
/// reached the rest of the current batch is skipped; the cursor still moves
/// past the whole batch.
///
/// A malformed page counts as an empty page and ends the aggregation.
///
/// # Errors
///
/// Returns the fetch error only when `plan.mode` is
/// [`AggregationMode::Replace`] and nothing has been accumulated. Any other
/// fetch failure is logged, marks the state exhausted, and yields `Ok` with
/// what was gathered.
pub async fn aggregate_until<F, K, C>(
    state: &mut AggregationState,
    fetcher: &F,
    plan: &ProbePlan<'_>,
    keep: K,
    counts: C,
) -> Result<AggregationReport, CatalogError>
where
    F: PageFetcher,
    K: Fn(&CatalogItem) -> bool,
    C: Fn(&CatalogItem) -> bool,
{
    let mut report = AggregationReport::default();
    if state.upstream_exhausted {
        return Ok(report);
    }

    let request_limit = plan.budget.request_limit.max(1);
    let mut counted = state.unique_items.iter().filter(|item| counts(item)).count();

    while counted < plan.target && report.probes < plan.budget.max_probes {
        report.probes += 1;
        state.probe_count = state.probe_count.saturating_add(1);

        let query = PageQuery {
            offset: state.next_offset,
            limit: request_limit,
            params: plan.params,
        };

        let batch = match fetcher.fetch_page(query).await {
            Ok(batch) => batch,
            Err(e) if e.is_empty_page() => {
                tracing::warn!(offset = state.next_offset, error = %e, "treating malformed listing page as empty");
                Vec::new()
            }
            Err(e) => {
                state.mark_exhausted();
                if plan.mode == AggregationMode::Replace && state.is_empty() {
                    return Err(e);
                }
                tracing::warn!(
                    offset = state.next_offset,
                    kept = state.len(),
                    mode = ?plan.mode,
                    error = %e,
                    "listing probe failed; keeping items gathered so far"
                );
                break;
            }
        };

        let batch_len = batch.len();
        for raw in &batch {
            if counted >= plan.target {
                break;
            }
            let item = normalize_item(raw, plan.locale);
            if !keep(&item) {
                continue;
            }
            let Some(key) = resolve_key(&item) else {
                tracing::debug!(offset = state.next_offset, "dropping listing row without identity");
                continue;
            };
            let counted_item = counts(&item);
            if state.insert(key, item) {
                report.added += 1;
                if counted_item {
                    counted += 1;
                }
            }
        }

        state.next_offset += batch_len;
        tracing::debug!(
            probe = report.probes,
            offset = state.next_offset,
            batch_len,
            kept = state.len(),
            counted,
            "listing probe complete"
        );

        if batch_len < request_limit {
            state.mark_exhausted();
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
