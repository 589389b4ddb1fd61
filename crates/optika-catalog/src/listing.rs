//! One listing page: aggregation, refinement, ordering, and the display
//! window behind a small read model.
//!
//! The general shop, category pages, and the contact-lens listing are all a
//! `ListingView` started from a different [`optika_core::ListingPreset`].
//!
//! ## Superseded aggregations
//!
//! Each replace-mode aggregation gets a new generation number. Work is split
//! into [`ListingView::begin_filter_change`] / [`ListingView::begin_load_more`]
//! (which hand out an [`AggregationTicket`]), [`AggregationTicket::run`]
//! (which owns its own state and touches the network), and
//! [`ListingView::apply`] (which drops outcomes from older generations). A
//! slow response for an old filter therefore never overwrites a newer one.

use optika_core::{AppConfig, CatalogItem, FilterScope, FilterSpec};
use serde::Serialize;

use crate::aggregate::{
    aggregate_until, AggregationMode, AggregationReport, AggregationState, AggregationTuning,
    ProbeBudget, ProbePlan,
};
use crate::error::CatalogError;
use crate::fetch::{CoarseParams, PageFetcher};
use crate::predicate;
use crate::sort::sort_items;
use crate::window::DisplayWindow;

/// Message shown when the first page of a listing cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum ListingStatus {
    Loading,
    Ok,
    Error(String),
}

/// What the UI renders.
#[derive(Debug, Serialize)]
pub struct ListingSnapshot<'a> {
    pub status: &'a ListingStatus,
    pub visible_items: Vec<&'a CatalogItem>,
    pub has_more: bool,
    pub is_loading_more: bool,
}

/// Result of asking for more items.
#[derive(Debug)]
pub enum LoadMore {
    /// Already-loaded items were revealed; no network call is needed.
    Revealed,
    /// More items must be fetched; run the ticket and apply its outcome.
    Fetch(AggregationTicket),
    /// An aggregation is already in flight.
    Busy,
    /// Everything available is visible.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    generation: u64,
    mode: AggregationMode,
}

/// A detached unit of aggregation work.
#[derive(Debug)]
pub struct AggregationTicket {
    generation: u64,
    mode: AggregationMode,
    state: AggregationState,
    scope: FilterScope,
    spec: FilterSpec,
    params: CoarseParams,
    /// Items passing the whole filter to hold before stopping.
    target: usize,
    budget: ProbeBudget,
    locale: String,
}

impl AggregationTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// Runs the aggregation against `fetcher`. Does not touch the view.
    ///
    /// Every scope match is kept, but only items that also pass brand and
    /// search count toward the target.
    pub async fn run<F: PageFetcher>(mut self, fetcher: &F) -> AggregationOutcome {
        let plan = ProbePlan {
            params: &self.params,
            target: self.target,
            budget: self.budget,
            mode: self.mode,
            locale: &self.locale,
        };
        let scope = &self.scope;
        let spec = &self.spec;
        let result = aggregate_until(
            &mut self.state,
            fetcher,
            &plan,
            |item| predicate::matches_scope(item, scope),
            |item| predicate::matches_refinements(item, spec),
        )
        .await;

        AggregationOutcome {
            generation: self.generation,
            mode: self.mode,
            state: self.state,
            result,
        }
    }
}

/// The finished work of an [`AggregationTicket`].
#[derive(Debug)]
pub struct AggregationOutcome {
    generation: u64,
    mode: AggregationMode,
    state: AggregationState,
    result: Result<AggregationReport, CatalogError>,
}

impl AggregationOutcome {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A listing page bound to one fetcher.
pub struct ListingView<F> {
    fetcher: F,
    tuning: AggregationTuning,
    locale: String,
    spec: FilterSpec,
    loaded_scope: Option<FilterScope>,
    state: AggregationState,
    window: DisplayWindow,
    status: ListingStatus,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl<F: PageFetcher> ListingView<F> {
    #[must_use]
    pub fn new(fetcher: F, tuning: AggregationTuning, locale: impl Into<String>) -> Self {
        Self {
            fetcher,
            tuning,
            locale: locale.into(),
            spec: FilterSpec::default(),
            loaded_scope: None,
            state: AggregationState::new(),
            window: DisplayWindow::new(tuning.page_size, 0),
            status: ListingStatus::Loading,
            generation: 0,
            in_flight: None,
        }
    }

    #[must_use]
    pub fn from_config(fetcher: F, config: &AppConfig) -> Self {
        Self::new(
            fetcher,
            AggregationTuning::from_config(config),
            config.title_locale.clone(),
        )
    }

    /// The fetcher tickets from this view should run against.
    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[must_use]
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    #[must_use]
    pub fn status(&self) -> &ListingStatus {
        &self.status
    }

    #[must_use]
    pub fn aggregation(&self) -> &AggregationState {
        &self.state
    }

    #[must_use]
    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Applies a new filter and, when its scope changed, runs a fresh
    /// aggregation.
    pub async fn on_filter_change(&mut self, spec: FilterSpec) {
        if let Some(ticket) = self.begin_filter_change(spec) {
            let outcome = ticket.run(&self.fetcher).await;
            self.apply(outcome);
        }
    }

    /// Reveals more loaded items or fetches more. Returns what happened.
    pub async fn on_load_more(&mut self) -> LoadMoreResult {
        match self.begin_load_more() {
            LoadMore::Fetch(ticket) => {
                let outcome = ticket.run(&self.fetcher).await;
                self.apply(outcome);
                LoadMoreResult::Fetched
            }
            LoadMore::Revealed => LoadMoreResult::Revealed,
            LoadMore::Busy => LoadMoreResult::Busy,
            LoadMore::Exhausted => LoadMoreResult::Exhausted,
        }
    }

    /// Collapses the window back to the first page.
    pub fn on_show_less(&mut self) {
        let available = self.filtered_len();
        self.window.collapse(available);
    }

    /// Records `spec` and returns a replace-mode ticket when the scope changed
    /// or the last load failed.
    ///
    /// A new aggregation supersedes any still in flight. Otherwise a change to
    /// brand, search, or sort only re-anchors the window.
    pub fn begin_filter_change(&mut self, spec: FilterSpec) -> Option<AggregationTicket> {
        let scope = spec.scope();
        self.spec = spec;

        let failed = matches!(self.status, ListingStatus::Error(_));
        if !failed && self.loaded_scope.as_ref() == Some(&scope) {
            let available = self.filtered_len();
            self.window.reset(available);
            return None;
        }

        self.generation += 1;
        self.loaded_scope = Some(scope.clone());
        self.state = AggregationState::new();
        self.window.reset(0);
        self.status = ListingStatus::Loading;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            mode: AggregationMode::Replace,
        });

        let budget = self.tuning.budget_for(&self.spec);
        tracing::debug!(generation = self.generation, ?scope, "starting listing aggregation");

        Some(AggregationTicket {
            generation: self.generation,
            mode: AggregationMode::Replace,
            state: AggregationState::new(),
            params: CoarseParams::from_scope(&scope),
            scope,
            spec: self.spec.clone(),
            target: self.tuning.page_size,
            budget,
            locale: self.locale.clone(),
        })
    }

    /// Reveals already-loaded items when any are hidden; otherwise hands out
    /// an append-mode ticket if the backend may have more.
    pub fn begin_load_more(&mut self) -> LoadMore {
        if self.in_flight.is_some() {
            return LoadMore::Busy;
        }
        let Some(scope) = self.loaded_scope.clone() else {
            return LoadMore::Exhausted;
        };

        let available = self.filtered_len();
        if self.window.has_hidden(available) {
            self.window.reveal(available);
            return LoadMore::Revealed;
        }
        if self.state.is_exhausted() {
            return LoadMore::Exhausted;
        }

        self.in_flight = Some(InFlight {
            generation: self.generation,
            mode: AggregationMode::Append,
        });
        let budget = self.tuning.budget_for(&self.spec);

        LoadMore::Fetch(AggregationTicket {
            generation: self.generation,
            mode: AggregationMode::Append,
            state: self.state.clone(),
            params: CoarseParams::from_scope(&scope),
            scope,
            spec: self.spec.clone(),
            target: available + self.tuning.page_size,
            budget,
            locale: self.locale.clone(),
        })
    }

    /// Folds a finished aggregation into the view. Returns `false` when the
    /// outcome belongs to a superseded generation and was discarded.
    pub fn apply(&mut self, outcome: AggregationOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding superseded aggregation"
            );
            return false;
        }

        self.in_flight = None;
        self.state = outcome.state;

        match outcome.result {
            Ok(report) => {
                self.status = ListingStatus::Ok;
                let available = self.filtered_len();
                match outcome.mode {
                    AggregationMode::Replace => {
                        tracing::info!(
                            generation = self.generation,
                            items = self.state.len(),
                            probes = report.probes,
                            exhausted = self.state.is_exhausted(),
                            "listing loaded"
                        );
                        self.window.reset(available);
                    }
                    AggregationMode::Append => {
                        tracing::debug!(added = report.added, probes = report.probes, "listing extended");
                        self.window.reveal(available);
                    }
                }
            }
            Err(e) => {
                tracing::error!(generation = self.generation, error = %e, "listing failed to load");
                self.status = ListingStatus::Error(LOAD_FAILED_MESSAGE.to_string());
                self.window.reset(0);
            }
        }

        true
    }

    /// Aggregated items passing every filter, in the requested order.
    #[must_use]
    pub fn filtered_sorted(&self) -> Vec<&CatalogItem> {
        let spec = &self.spec;
        sort_items(
            self.state
                .items()
                .iter()
                .filter(|item| predicate::matches(item, spec)),
            spec.sort_key,
        )
    }

    fn filtered_len(&self) -> usize {
        self.state
            .items()
            .iter()
            .filter(|item| predicate::matches(item, &self.spec))
            .count()
    }

    /// The read model for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ListingSnapshot<'_> {
        let filtered = self.filtered_sorted();
        let has_more = matches!(self.status, ListingStatus::Ok)
            && (self.window.has_hidden(filtered.len()) || !self.state.is_exhausted());
        let visible_items = filtered
            .into_iter()
            .take(self.window.visible_count())
            .collect();

        ListingSnapshot {
            status: &self.status,
            visible_items,
            has_more,
            is_loading_more: matches!(
                self.in_flight,
                Some(InFlight {
                    mode: AggregationMode::Append,
                    ..
                })
            ),
        }
    }
}

/// What [`ListingView::on_load_more`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreResult {
    Revealed,
    Fetched,
    Busy,
    Exhausted,
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
