//! Client-credentials token exchange for the source API.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use bridge_http::{HttpClient, HttpMethod, HttpRequest};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::info;

use crate::error::{Result, SpotifyError};
use crate::types::TokenResponse;

/// Token endpoint URL
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// App-level access token for source catalog reads.
///
/// # Security
///
/// The `Debug` implementation redacts the token value.
#[derive(Clone)]
pub struct SourceAccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl SourceAccessToken {
    pub fn new(token: String, expires_in: i64) -> Self {
        Self {
            token,
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl fmt::Debug for SourceAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceAccessToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Request an app-level access token via the client-credentials grant.
///
/// # Errors
///
/// Fatal: the migration cannot read the source playlist without it.
pub async fn request_access_token(
    http: &dyn HttpClient,
    client_id: &str,
    client_secret: &str,
) -> Result<SourceAccessToken> {
    let basic = BASE64_STANDARD.encode(format!("{client_id}:{client_secret}"));
    let request = HttpRequest::new(HttpMethod::Post, TOKEN_URL)
        .header("Authorization", format!("Basic {basic}"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Bytes::from_static(b"grant_type=client_credentials"));

    let response = http
        .execute(request)
        .await
        .map_err(|e| SpotifyError::Network(e.to_string()))?;

    if !response.is_success() {
        return Err(SpotifyError::Api {
            status: response.status,
            message: response.text().unwrap_or_default(),
        });
    }

    let token: TokenResponse = response
        .json()
        .map_err(|e| SpotifyError::Parse(e.to_string()))?;

    info!(
        token_type = %token.token_type,
        expires_in = token.expires_in,
        "source access token obtained"
    );

    Ok(SourceAccessToken::new(token.access_token, token.expires_in))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_http::HttpResponse;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    struct SequenceHttpClient {
        responses: Mutex<VecDeque<HttpResponse>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl SequenceHttpClient {
        fn new(responses: Vec<HttpResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for SequenceHttpClient {
        async fn execute(&self, request: HttpRequest) -> bridge_http::Result<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request"))
        }
    }

    fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(serde_json::to_vec(&body).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_sends_basic_auth_and_grant_type() {
        let http = SequenceHttpClient::new(vec![json_response(
            200,
            serde_json::json!({
                "access_token": "token-abc",
                "token_type": "Bearer",
                "expires_in": 3600
            }),
        )]);

        let token = request_access_token(&http, "my-id", "my-secret")
            .await
            .unwrap();
        assert_eq!(token.as_str(), "token-abc");
        assert!(!token.is_expired());

        let requests = http.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, TOKEN_URL);

        let expected_basic = format!("Basic {}", BASE64_STANDARD.encode("my-id:my-secret"));
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some(&expected_basic)
        );
        assert_eq!(
            requests[0].body.as_deref(),
            Some(b"grant_type=client_credentials".as_slice())
        );
    }

    #[tokio::test]
    async fn test_rejected_credentials_are_fatal() {
        let http = SequenceHttpClient::new(vec![json_response(
            400,
            serde_json::json!({"error": "invalid_client"}),
        )]);

        let result = request_access_token(&http, "my-id", "bad-secret").await;
        assert!(matches!(
            result,
            Err(SpotifyError::Api { status: 400, .. })
        ));
    }

    #[test]
    fn test_token_debug_redacts() {
        let token = SourceAccessToken::new("secret-token".to_string(), 3600);
        let debug_str = format!("{:?}", token);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret-token"));
    }
}
