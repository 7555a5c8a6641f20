use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Everything that can end a run. Missing fields on an otherwise valid
/// entry are not errors; they become empty cells in the output.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// HTTP 404 gets its own variant: past the last listing page the site
    /// answers 404, and the pagination driver treats that as a normal stop.
    #[error("{url} does not exist (HTTP 404)")]
    PageNotFound { url: String },

    #[error("invalid selector {0:?}: {1}")]
    Selector(String, String),

    #[error("invalid base url {0:?}: {1}")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
