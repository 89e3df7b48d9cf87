use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("invalid request or response body: {0}")]
    Body(String),
}

pub type Result<T> = std::result::Result<T, HttpError>;
