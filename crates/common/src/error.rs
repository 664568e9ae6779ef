use thiserror::Error;

/// Maximum number of characters of a response body kept in diagnostics.
const MAX_LOGGED_BODY: usize = 512;

/// Fatal configuration problems, detected before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("{0} must be a valid u64")]
    InvalidVar(&'static str),
}

/// Failures while fetching a promo code from the drop API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("drop API request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to connect to drop API at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("drop API returned HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("drop API response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("drop API response carries no non-empty `code` field")]
    MissingCode,
}

impl FetchError {
    /// Classify a transport-level failure from the HTTP client.
    /// Timeouts get their own kind; everything else is a connection failure.
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Connection {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Failures while delivering the announcement to the webhook.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to connect to webhook at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("webhook returned HTTP {status} instead of 204: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl NotifyError {
    /// Classify a transport-level failure from the HTTP client.
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            NotifyError::Timeout {
                url: url.to_string(),
            }
        } else {
            NotifyError::Connection {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Cap a response body for diagnostic logging.
pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_LOGGED_BODY) {
        Some((idx, _)) => format!("{}… ({} bytes total)", &body[..idx], body.len()),
        None => body.to_string(),
    }
}
