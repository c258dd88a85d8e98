use thiserror::Error;

/// Failure of an upstream search call. Always recovered by the pipeline.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered with a non-success status
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Connection, timeout or body read failure
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced to whoever called the pipeline.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Neither text nor url was given
    #[error("{0}")]
    InvalidInput(String),

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}
