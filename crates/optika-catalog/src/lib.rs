//! Client-side catalog aggregation over a coarse, offset-paged product API.
//!
//! [`aggregate::aggregate`] fills an [`AggregationState`] with unique items
//! matching a filter scope, [`predicate`] and [`sort`] shape the accumulated
//! set, and [`ListingView`] ties them to a [`DisplayWindow`] for one listing
//! page.

pub mod aggregate;
pub mod alias;
pub mod client;
pub mod error;
pub mod fetch;
pub mod key;
pub mod listing;
pub mod normalize;
mod parse;
pub mod predicate;
pub mod sort;
pub mod types;
pub mod window;

#[cfg(test)]
mod test_support;

pub use aggregate::{
    aggregate, aggregate_until, AggregationMode, AggregationReport, AggregationState,
    AggregationTuning, ProbeBudget, ProbePlan,
};
pub use client::CatalogClient;
pub use error::CatalogError;
pub use fetch::{CoarseParams, PageFetcher, PageQuery};
pub use key::resolve_key;
pub use listing::{
    AggregationOutcome, AggregationTicket, ListingSnapshot, ListingStatus, ListingView, LoadMore,
    LoadMoreResult, LOAD_FAILED_MESSAGE,
};
pub use normalize::normalize_item;
pub use sort::sort_items;
pub use types::RawItem;
pub use window::DisplayWindow;
