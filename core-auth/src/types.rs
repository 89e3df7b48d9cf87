use chrono::{DateTime, Utc};
use std::fmt;

/// Signed developer token for destination API calls.
///
/// Carries the opaque JWT plus its validity interval. Shared read-only by
/// every worker for the lifetime of a run.
///
/// # Security
///
/// Tokens must never be logged or persisted. The `Debug` implementation
/// redacts the signed value.
#[derive(Clone)]
pub struct DeveloperToken {
    token: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl DeveloperToken {
    /// Wrap an already-signed token with its validity interval.
    ///
    /// [`issue_developer_token`](crate::issue_developer_token) is the normal
    /// way to obtain one.
    pub fn new(token: String, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            issued_at,
            expires_at,
        }
    }

    /// The signed token, for use as a bearer credential.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// When the token was issued (UTC).
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// When the token expires (UTC).
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check whether the token has passed its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

// Custom Debug implementation to avoid logging the signed token
impl fmt::Debug for DeveloperToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeveloperToken")
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// User-scoped credential for destination library writes.
///
/// Distinct from the app-level [`DeveloperToken`]: search uses only the
/// developer token, while playlist creation attaches both.
#[derive(Clone)]
pub struct UserToken(String);

impl UserToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_developer_token_accessors() {
        let now = Utc::now();
        let token = DeveloperToken::new("abc.def.ghi".to_string(), now, now + Duration::hours(1));
        assert_eq!(token.as_str(), "abc.def.ghi");
        assert_eq!(token.issued_at(), now);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_developer_token_expired() {
        let past = Utc::now() - Duration::hours(2);
        let token = DeveloperToken::new("abc".to_string(), past, past + Duration::hours(1));
        assert!(token.is_expired());
    }

    #[test]
    fn test_developer_token_debug_redacts() {
        let now = Utc::now();
        let token =
            DeveloperToken::new("secret_signed_token".to_string(), now, now + Duration::hours(1));
        let debug_str = format!("{:?}", token);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret_signed_token"));
    }

    #[test]
    fn test_user_token_debug_redacts() {
        let token = UserToken::new("secret_user_token");
        let debug_str = format!("{:?}", token);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret_user_token"));
        assert_eq!(token.as_str(), "secret_user_token");
    }
}
