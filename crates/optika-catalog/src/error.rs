use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The body was not a JSON array. Aggregation treats this as an empty page.
    #[error("malformed listing response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("invalid API base \"{api_base}\": {reason}")]
    InvalidApiBase { api_base: String, reason: String },
}

impl CatalogError {
    /// `true` for failures that should read as "this page had nothing" rather
    /// than "the backend could not be reached".
    #[must_use]
    pub fn is_empty_page(&self) -> bool {
        matches!(self, CatalogError::MalformedResponse { .. })
    }
}
