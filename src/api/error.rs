use thiserror::Error;

/// Errors returned by the NHL API client
#[derive(Error, Debug)]
pub enum NHLApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Http { status: u16, url: String },

    #[error("rate limit exceeded for {url}")]
    RateLimitExceeded { url: String },

    #[error("unable to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl NHLApiError {
    /// HTTP status code if the server answered with an error status
    pub fn status(&self) -> Option<u16> {
        match self {
            NHLApiError::Http { status, .. } => Some(*status),
            NHLApiError::RateLimitExceeded { .. } => Some(429),
            _ => None,
        }
    }
}
