use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppleMusicError {
    #[error("network error: {0}")]
    Network(String),

    #[error("destination API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid destination response: {0}")]
    Parse(String),

    #[error("user token rejected by the destination API (status {0})")]
    UserTokenRejected(u16),

    #[error("playlist creation rejected (status {status}): {message}")]
    PlaylistCreation { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, AppleMusicError>;
