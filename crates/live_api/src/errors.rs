use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiveApiError {
    #[error("Client error: {0}")]
    ClientError(#[from] reqwest::Error),
    #[error("API error: {error}")]
    ApiError { error: String },
}
