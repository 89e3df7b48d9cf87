//! # Destination API Credentials
//!
//! Issues the short-lived signed developer token that authorizes every
//! destination-catalog call, and wraps the user-scoped token required for
//! library writes.
//!
//! Token issuance is a pure signing operation: no network, no storage. The
//! credential is owned by the run that created it and is never persisted.

pub mod error;
pub mod issuer;
pub mod types;

pub use error::{AuthError, Result};
pub use issuer::{issue_developer_token, issue_developer_token_at, TOKEN_LIFETIME_SECS};
pub use types::{DeveloperToken, UserToken};
