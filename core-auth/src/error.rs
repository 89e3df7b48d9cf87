use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    #[error("token signing failed: {0}")]
    Signing(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
