//! Destination API connector.

use async_trait::async_trait;
use bridge_http::{HttpClient, HttpMethod, HttpRequest};
use core_auth::{DeveloperToken, UserToken};
use core_limit::RateLimiter;
use core_resolve::{CatalogError, SongCatalog, SongId};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{AppleMusicError, Result};
use crate::types::{
    CreatePlaylistRequest, CreatePlaylistResponse, CreatedPlaylist, PlaylistAttributes,
    PlaylistRelationships, SearchResponse, TrackRef, TrackRefList,
};

/// Destination API base URL
const API_BASE: &str = "https://api.music.apple.com/v1";

/// Search result limit; only the first match is ever used.
const SEARCH_LIMIT: u32 = 1;

/// Default catalog storefront
pub const DEFAULT_STOREFRONT: &str = "us";

/// Destination API client
///
/// Holds the app-level developer token and the injected destination search
/// limiter. Every search attempt acquires one limiter slot before the
/// request goes out; library operations (verify, create) do not contend on
/// the search window.
pub struct AppleMusicClient {
    http: Arc<dyn HttpClient>,
    developer_token: DeveloperToken,
    storefront: String,
    limiter: Arc<RateLimiter>,
}

impl AppleMusicClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        developer_token: DeveloperToken,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            http,
            developer_token,
            storefront: DEFAULT_STOREFRONT.to_string(),
            limiter,
        }
    }

    /// Override the catalog storefront.
    pub fn with_storefront(mut self, storefront: impl Into<String>) -> Self {
        self.storefront = storefront.into();
        self
    }

    /// Confirm the user-scoped token is live before spending API quota.
    ///
    /// # Errors
    ///
    /// [`AppleMusicError::UserTokenRejected`] on 401/403; fatal before
    /// resolution begins.
    pub async fn verify_user_token(&self, user_token: &UserToken) -> Result<()> {
        let request = HttpRequest::new(HttpMethod::Get, format!("{API_BASE}/me/storefront"))
            .bearer_token(self.developer_token.as_str())
            .header("Music-User-Token", user_token.as_str());

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AppleMusicError::Network(e.to_string()))?;

        match response.status {
            status if response.is_success() => {
                debug!(status, "user token verified");
                Ok(())
            }
            401 | 403 => Err(AppleMusicError::UserTokenRejected(response.status)),
            status => Err(AppleMusicError::Api {
                status,
                message: response.text().unwrap_or_default(),
            }),
        }
    }

    /// Create a destination playlist from the resolved identifiers.
    ///
    /// Requires the user-scoped token in addition to the developer bearer
    /// token.
    ///
    /// # Errors
    ///
    /// [`AppleMusicError::PlaylistCreation`] if the API rejects the request;
    /// fatal, reported after resolution completes.
    #[instrument(skip(self, song_ids, user_token), fields(count = song_ids.len()))]
    pub async fn create_playlist(
        &self,
        name: &str,
        song_ids: &[SongId],
        user_token: &UserToken,
    ) -> Result<CreatedPlaylist> {
        info!("creating destination playlist");

        let payload = CreatePlaylistRequest {
            attributes: PlaylistAttributes {
                name: name.to_string(),
            },
            relationships: PlaylistRelationships {
                tracks: TrackRefList {
                    data: song_ids
                        .iter()
                        .map(|id| TrackRef {
                            id: id.as_str().to_string(),
                            kind: "songs".to_string(),
                        })
                        .collect(),
                },
            },
        };

        let request =
            HttpRequest::new(HttpMethod::Post, format!("{API_BASE}/me/library/playlists"))
                .bearer_token(self.developer_token.as_str())
                .header("Music-User-Token", user_token.as_str())
                .json(&payload)
                .map_err(|e| AppleMusicError::Parse(e.to_string()))?;

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AppleMusicError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(AppleMusicError::PlaylistCreation {
                status: response.status,
                message: response.text().unwrap_or_default(),
            });
        }

        let parsed: CreatePlaylistResponse = response
            .json()
            .map_err(|e| AppleMusicError::Parse(e.to_string()))?;
        let record = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AppleMusicError::Parse("empty playlist creation response".to_string()))?;

        let created = CreatedPlaylist {
            id: record.id,
            name: record
                .attributes
                .map(|a| a.name)
                .unwrap_or_else(|| name.to_string()),
        };
        info!(playlist_id = %created.id, "destination playlist created");
        Ok(created)
    }
}

#[async_trait]
impl SongCatalog for AppleMusicClient {
    /// Search the destination catalog, scoped to songs, limit 1.
    ///
    /// Authenticates with the developer bearer token only; no
    /// user-identifying header is attached to search.
    async fn search_song(&self, term: &str) -> std::result::Result<Option<SongId>, CatalogError> {
        self.limiter.acquire().await;

        let url = format!(
            "{API_BASE}/catalog/{}/search?term={}&types=songs&limit={SEARCH_LIMIT}",
            self.storefront,
            urlencoding::encode(term)
        );
        debug!(%term, "searching destination catalog");

        let request =
            HttpRequest::new(HttpMethod::Get, url).bearer_token(self.developer_token.as_str());

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(CatalogError::Api {
                status: response.status,
                message: response.text().unwrap_or_default(),
            });
        }

        let parsed: SearchResponse = response
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(parsed
            .results
            .songs
            .and_then(|songs| songs.data.into_iter().next())
            .map(|song| SongId::new(song.id)))
    }
}
