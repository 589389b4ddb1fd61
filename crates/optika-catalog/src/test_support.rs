//! In-memory [`PageFetcher`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::error::CatalogError;
use crate::fetch::{PageFetcher, PageQuery};
use crate::types::RawItem;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Failure {
    Status(u16),
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub offset: usize,
    pub limit: usize,
    pub categories: Vec<String>,
}

/// Serves slices of a fixed row list by offset/limit, optionally per
/// first category parameter, and records every call.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFetcher {
    rows: Vec<Value>,
    scoped_rows: HashMap<String, Vec<Value>>,
    failures: HashMap<usize, Failure>,
    fail_first: usize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedFetcher {
    pub(crate) fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Rows served when the first `category` parameter equals `category`.
    pub(crate) fn with_scoped_rows(mut self, category: &str, rows: Vec<Value>) -> Self {
        self.scoped_rows.insert(category.to_string(), rows);
        self
    }

    /// Fail every request that starts at `offset`.
    pub(crate) fn failing_at(mut self, offset: usize, failure: Failure) -> Self {
        self.failures.insert(offset, failure);
        self
    }

    /// Fail the first `count` requests with a 503, whatever their offset.
    pub(crate) fn failing_first(mut self, count: usize) -> Self {
        self.fail_first = count;
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    fn serve(&self, query: &PageQuery<'_>) -> Result<Vec<RawItem>, CatalogError> {
        let call_number = {
            let mut calls = self.calls.lock().expect("calls lock poisoned");
            calls.push(RecordedCall {
                offset: query.offset,
                limit: query.limit,
                categories: query.params.categories.clone(),
            });
            calls.len()
        };

        if call_number <= self.fail_first {
            return Err(CatalogError::UnexpectedStatus {
                status: 503,
                url: format!("scripted://call/{call_number}"),
            });
        }

        match self.failures.get(&query.offset) {
            Some(Failure::Status(status)) => {
                return Err(CatalogError::UnexpectedStatus {
                    status: *status,
                    url: format!("scripted://offset/{}", query.offset),
                })
            }
            Some(Failure::Malformed) => {
                return Err(CatalogError::MalformedResponse {
                    url: format!("scripted://offset/{}", query.offset),
                    reason: "expected a JSON array, got an object".to_string(),
                })
            }
            None => {}
        }

        let rows = query
            .params
            .categories
            .first()
            .and_then(|c| self.scoped_rows.get(c))
            .unwrap_or(&self.rows);

        Ok(rows
            .iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .map(RawItem::from_value)
            .collect())
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, query: PageQuery<'_>) -> Result<Vec<RawItem>, CatalogError> {
        self.serve(&query)
    }
}

/// A regular in-category row keyed by `slug`.
pub(crate) fn row(slug: &str, category: &str) -> Value {
    json!({
        "slug": slug,
        "title": format!("Frame {slug}"),
        "brand": "Ray-Ban",
        "category": category,
        "price": 100,
        "createdAt": 0
    })
}

/// `count` rows with slugs `{prefix}-{n}` in `category`.
pub(crate) fn rows(prefix: &str, category: &str, count: usize) -> Vec<Value> {
    (0..count).map(|n| row(&format!("{prefix}-{n}"), category)).collect()
}
