use thiserror::Error;

/// Failure of a single catalog search attempt.
///
/// Always transient from the batch's point of view: the resolver logs it and
/// degrades the attempt to a miss, so one track's failure cannot abort the
/// run.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("catalog API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid catalog response: {0}")]
    Parse(String),
}
