//! HTTP client for the storefront `shop-products` listing endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::CatalogError;
use crate::fetch::{CoarseParams, PageFetcher, PageQuery};
use crate::types::RawItem;

/// Path of the listing endpoint relative to the API base.
const LISTING_PATH: &str = "shop-products";

/// HTTP client for `GET {api_base}/shop-products`.
///
/// Non-2xx responses and bodies that are not a JSON array come back as typed
/// errors. There is no retry: a failed probe is reported once and the
/// aggregation decides what to do with it.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    api_base: Url,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidApiBase`] if `api_base` is not an absolute
    ///   `http(s)` URL.
    /// - [`CatalogError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(api_base: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let api_base = parse_api_base(api_base)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, api_base })
    }

    /// Builds the listing URL for one probe. Aliases and audiences become
    /// repeated `category` / `audience` parameters.
    fn listing_url(&self, offset: usize, limit: usize, params: &CoarseParams) -> String {
        let mut url = self.api_base.clone();
        // `parse_api_base` rejects cannot-be-a-base URLs, so this always applies.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(LISTING_PATH);
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("limit", &limit.to_string())
                .append_pair("offset", &offset.to_string());
            for category in &params.categories {
                pairs.append_pair("category", category);
            }
            for audience in &params.audiences {
                pairs.append_pair("audience", audience);
            }
        }

        url.to_string()
    }
}

impl PageFetcher for CatalogClient {
    /// Fetches one page of listing rows.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`]: network or TLS failure.
    /// - [`CatalogError::UnexpectedStatus`]: any non-2xx status.
    /// - [`CatalogError::MalformedResponse`]: body is not a JSON array.
    async fn fetch_page(&self, query: PageQuery<'_>) -> Result<Vec<RawItem>, CatalogError> {
        let url = self.listing_url(query.offset, query.limit, query.params);
        tracing::debug!(%url, offset = query.offset, limit = query.limit, "fetching listing page");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        parse_listing_body(&body).map_err(|reason| CatalogError::MalformedResponse { url, reason })
    }
}

/// Decodes a listing body into rows, one per array element.
fn parse_listing_body(body: &str) -> Result<Vec<RawItem>, String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(elements)) => Ok(elements.into_iter().map(RawItem::from_value).collect()),
        Ok(other) => Err(format!("expected a JSON array, got {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validates the configured API base.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidApiBase`] when the value does not parse or
/// is not an `http`/`https` URL that can carry path segments.
fn parse_api_base(api_base: &str) -> Result<Url, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidApiBase {
        api_base: api_base.to_owned(),
        reason,
    };

    let url = Url::parse(api_base.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
