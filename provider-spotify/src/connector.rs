//! Source playlist reader.

use bridge_http::{HttpClient, HttpMethod, HttpRequest};
use core_limit::RateLimiter;
use core_resolve::Track;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::auth::SourceAccessToken;
use crate::error::{Result, SpotifyError};
use crate::types::{PlaylistMeta, TracksPage};

/// Source API base URL
const API_BASE: &str = "https://api.spotify.com/v1";

/// Tracks requested per page (source API maximum)
const PAGE_SIZE: u32 = 100;

/// Source API client
///
/// Pages through a playlist's tracks until no further page is returned.
/// Every listing request passes through the injected source rate limiter,
/// shared with any other caller of the listing endpoints.
pub struct SpotifyClient {
    http: Arc<dyn HttpClient>,
    access_token: SourceAccessToken,
    limiter: Arc<RateLimiter>,
}

/// Ordered source playlist contents.
#[derive(Debug, Clone)]
pub struct SourcePlaylist {
    /// Display name of the playlist.
    pub name: String,
    /// Tracks in playlist order.
    pub tracks: Vec<Track>,
}

impl SpotifyClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        access_token: SourceAccessToken,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            http,
            access_token,
            limiter,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token.as_str())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        self.limiter.acquire().await;

        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(SpotifyError::Api {
                status: response.status,
                message: response.text().unwrap_or_default(),
            });
        }

        response.json().map_err(|e| SpotifyError::Parse(e.to_string()))
    }

    /// Fetch the playlist's display name and its full ordered track list.
    ///
    /// # Errors
    ///
    /// Fatal on an invalid identifier or any API rejection; the migration has
    /// no source list to work from.
    #[instrument(skip(self))]
    pub async fn fetch_playlist(&self, playlist_id: &str) -> Result<SourcePlaylist> {
        info!("fetching source playlist");

        let meta: PlaylistMeta = self
            .get_json(format!("{API_BASE}/playlists/{playlist_id}?fields=name"))
            .await?;

        let mut tracks = Vec::new();
        let mut next = Some(format!(
            "{API_BASE}/playlists/{playlist_id}/tracks?limit={PAGE_SIZE}&offset=0"
        ));
        while let Some(url) = next {
            let page: TracksPage = self.get_json(url).await?;
            for item in page.items {
                let Some(track) = item.track else {
                    debug!("skipping unavailable playlist entry");
                    continue;
                };
                let artist = track
                    .artists
                    .into_iter()
                    .next()
                    .map(|a| a.name)
                    .unwrap_or_default();
                let album = track.album.map(|a| a.name).unwrap_or_default();
                tracks.push(Track::new(track.name, artist, album));
            }
            next = page.next;
        }

        info!(count = tracks.len(), name = %meta.name, "source playlist fetched");
        Ok(SourcePlaylist {
            name: meta.name,
            tracks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_http::HttpResponse;
    use bytes::Bytes;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

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

        fn request_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.url.clone())
                .collect()
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

    fn track_json(name: &str, artist: &str, album: &str) -> serde_json::Value {
        serde_json::json!({
            "track": {
                "name": name,
                "artists": [{"name": artist}],
                "album": {"name": album}
            }
        })
    }

    fn client(http: Arc<SequenceHttpClient>) -> SpotifyClient {
        let limiter = Arc::new(RateLimiter::new("test-listing", 1000, Duration::from_secs(1)));
        let token = SourceAccessToken::new("token-abc".to_string(), 3600);
        SpotifyClient::new(http, token, limiter)
    }

    #[tokio::test]
    async fn test_fetches_name_and_pages_in_order() {
        let http = Arc::new(SequenceHttpClient::new(vec![
            json_response(200, serde_json::json!({"name": "Road Trip"})),
            json_response(
                200,
                serde_json::json!({
                    "items": [
                        track_json("Song A", "Artist X", "Album 1"),
                        track_json("Song B", "Artist Y", "")
                    ],
                    "next": format!("{API_BASE}/playlists/pl1/tracks?limit=100&offset=100")
                }),
            ),
            json_response(
                200,
                serde_json::json!({
                    "items": [track_json("Song C", "Artist Z", "Album 3")],
                    "next": null
                }),
            ),
        ]));

        let playlist = client(Arc::clone(&http)).fetch_playlist("pl1").await.unwrap();

        assert_eq!(playlist.name, "Road Trip");
        assert_eq!(
            playlist.tracks,
            vec![
                Track::new("Song A", "Artist X", "Album 1"),
                Track::new("Song B", "Artist Y", ""),
                Track::new("Song C", "Artist Z", "Album 3"),
            ]
        );

        let urls = http.request_urls();
        assert_eq!(urls.len(), 3);
        assert!(urls[0].ends_with("/playlists/pl1?fields=name"));
        assert!(urls[1].contains("/playlists/pl1/tracks"));
        assert!(urls[2].contains("offset=100"));
    }

    #[tokio::test]
    async fn test_skips_unavailable_entries() {
        let http = Arc::new(SequenceHttpClient::new(vec![
            json_response(200, serde_json::json!({"name": "Mixed"})),
            json_response(
                200,
                serde_json::json!({
                    "items": [
                        track_json("Song A", "Artist X", ""),
                        {"track": null},
                        track_json("Song B", "Artist Y", "")
                    ],
                    "next": null
                }),
            ),
        ]));

        let playlist = client(http).fetch_playlist("pl1").await.unwrap();
        assert_eq!(playlist.tracks.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_playlist_is_fatal() {
        let http = Arc::new(SequenceHttpClient::new(vec![json_response(
            404,
            serde_json::json!({"error": {"status": 404, "message": "Not found"}}),
        )]));

        let result = client(http).fetch_playlist("missing").await;
        assert!(matches!(
            result,
            Err(SpotifyError::Api { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_requests_carry_bearer_token() {
        let http = Arc::new(SequenceHttpClient::new(vec![
            json_response(200, serde_json::json!({"name": "Road Trip"})),
            json_response(200, serde_json::json!({"items": [], "next": null})),
        ]));

        client(Arc::clone(&http)).fetch_playlist("pl1").await.unwrap();

        let requests = http.requests.lock().unwrap();
        for request in requests.iter() {
            assert_eq!(
                request.headers.get("Authorization"),
                Some(&"Bearer token-abc".to_string())
            );
        }
    }
}
