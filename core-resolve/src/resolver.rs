//! Two-tier fallback search against the destination catalog.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::track::{ResolutionOutcome, SongId, Track};

/// Search interface to the destination catalog.
///
/// Implementations are expected to pass every call through the destination
/// rate limiter before the request goes out, so a resolution that performs
/// two attempts consumes two rate-limit slots.
#[async_trait]
pub trait SongCatalog: Send + Sync {
    /// Search the catalog for songs matching `term`; returns the first
    /// match's identifier, if any.
    async fn search_song(&self, term: &str) -> Result<Option<SongId>, CatalogError>;
}

/// Resolves one track to a destination identifier.
///
/// Never fails: transport errors are logged and degrade the attempt to a
/// miss, so one track's failure cannot abort the batch.
pub struct TrackResolver {
    catalog: Arc<dyn SongCatalog>,
}

impl TrackResolver {
    pub fn new(catalog: Arc<dyn SongCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a track with the two-tier fallback strategy.
    ///
    /// Attempt 1 searches with title, artist, and album. If it yields no
    /// match and the track has an album, attempt 2 retries without the album.
    /// With no album there is exactly one attempt.
    pub async fn resolve(&self, track: &Track) -> ResolutionOutcome {
        if let Some(id) = self.attempt(&track.search_term(), track).await {
            return ResolutionOutcome::Found(id);
        }

        if track.has_album() {
            debug!(title = %track.title, artist = %track.artist, "retrying without album");
            if let Some(id) = self.attempt(&track.fallback_term(), track).await {
                return ResolutionOutcome::Found(id);
            }
        }

        debug!(title = %track.title, artist = %track.artist, "no catalog match");
        ResolutionOutcome::NotFound
    }

    async fn attempt(&self, term: &str, track: &Track) -> Option<SongId> {
        match self.catalog.search_song(term).await {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    title = %track.title,
                    artist = %track.artist,
                    error = %e,
                    "search attempt failed"
                );
                None
            }
        }
    }
}
