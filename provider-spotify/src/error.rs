use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("invalid playlist reference: {0}")]
    InvalidPlaylistRef(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("source API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid source response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, SpotifyError>;
