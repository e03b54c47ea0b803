use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to build request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("No API key configured for the recommendation service")]
    MissingApiKey,
}

pub type MapsResult<T> = Result<T, MapsError>;
