use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Fatal failures talking to the Report Service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be sent or the response could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{url} returned {status}\n{body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body did not have the expected structure.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service knows no applications at all.
    #[error("no applications found at {url}")]
    NoApplications { url: String },
}

impl ServiceError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            ServiceError::Request { url, .. }
            | ServiceError::Status { url, .. }
            | ServiceError::Decode { url, .. }
            | ServiceError::NoApplications { url } => url,
        }
    }
}
