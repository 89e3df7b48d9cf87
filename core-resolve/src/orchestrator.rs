//! # Resolution Orchestrator
//!
//! Drives the [`TrackResolver`] over every track in the input list with
//! bounded parallelism, guaranteeing that the final identifier sequence
//! preserves input order and that every track yields exactly one outcome.
//!
//! ## Design
//!
//! One task per (position, track) is spawned up front; a semaphore bounds how
//! many run at once. Each task writes its outcome into a preallocated slot
//! vector at its own position — that slot-by-index store is what restores
//! ordering after out-of-order completion. A task that panics surfaces as a
//! join error at the collection point and is recorded as not-found for its
//! position; sibling tasks are never cancelled.
//!
//! The batch runs Pending → Running → Complete with no mid-batch
//! cancellation; the only early exit is the optional deadline, which stops
//! work still in flight and reports already-resolved results plus not-found
//! for the remainder.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use crate::report::ResolutionReport;
use crate::resolver::TrackResolver;
use crate::track::{ResolutionOutcome, Track};

/// Default size of the worker pool.
///
/// The destination search endpoint's rate limit is the real throughput
/// constraint; more workers than the limiter can feed only add scheduling
/// overhead.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Tuning knobs for one resolution batch.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Maximum number of concurrently running resolution tasks.
    pub max_concurrency: usize,
    /// Overall batch deadline. On expiry, tasks not yet started skip the
    /// catalog entirely and unfinished tracks are reported as not found.
    pub deadline: Option<Duration>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            deadline: None,
        }
    }
}

/// Observer for batch progress.
///
/// Receives a monotonically increasing completed-count out of the fixed
/// total, suitable for a progress indicator. Partial result lists are never
/// exposed mid-run.
pub trait ProgressSink: Send + Sync {
    fn on_resolved(&self, completed: usize, total: usize);
}

/// Fans a track batch out across a bounded worker pool.
pub struct Orchestrator {
    resolver: Arc<TrackResolver>,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl Orchestrator {
    pub fn new(resolver: Arc<TrackResolver>) -> Self {
        Self {
            resolver,
            progress: None,
        }
    }

    /// Attach a progress observer.
    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Resolve every track in the batch.
    ///
    /// Returns once all tasks have completed (or the deadline has expired).
    /// The report always accounts for every input track exactly once.
    pub async fn resolve_all(&self, tracks: Vec<Track>, options: ResolveOptions) -> ResolutionReport {
        let total = tracks.len();
        if total == 0 {
            return ResolutionReport {
                ordered_ids: Vec::new(),
                not_found: Vec::new(),
                total: 0,
            };
        }

        info!(total, max_concurrency = options.max_concurrency, "starting resolution batch");

        let deadline = options.deadline.map(|d| Instant::now() + d);
        let slots: Arc<Mutex<Vec<Option<ResolutionOutcome>>>> =
            Arc::new(Mutex::new(vec![None; total]));
        let semaphore = Arc::new(Semaphore::new(options.max_concurrency.max(1)));
        let completed = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(total);
        for (position, track) in tracks.iter().cloned().enumerate() {
            let resolver = Arc::clone(&self.resolver);
            let slots = Arc::clone(&slots);
            let semaphore = Arc::clone(&semaphore);
            let completed = Arc::clone(&completed);
            let progress = self.progress.clone();

            let handle = tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed; an empty slot degrades
                    // to not-found at the collection point.
                    Err(_) => return,
                };

                let outcome = match deadline {
                    Some(when) if Instant::now() >= when => {
                        warn!(position, title = %track.title, "deadline expired before resolution started");
                        ResolutionOutcome::NotFound
                    }
                    Some(when) => tokio::select! {
                        outcome = resolver.resolve(&track) => outcome,
                        _ = sleep_until(when) => {
                            warn!(position, title = %track.title, "deadline expired mid-resolution");
                            ResolutionOutcome::NotFound
                        }
                    },
                    None => resolver.resolve(&track).await,
                };

                // Each task owns its slot exclusively.
                slots.lock().await[position] = Some(outcome);

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(sink) = &progress {
                    sink.on_resolved(done, total);
                }
            });
            handles.push((position, handle));
        }

        // Collection point: completion order is irrelevant, awaiting join
        // handles does not serialize the tasks themselves. A join error here
        // means the task panicked; the batch continues.
        for (position, handle) in handles {
            if let Err(e) = handle.await {
                warn!(
                    position,
                    track = %tracks[position],
                    error = %e,
                    "resolution task failed; marking track as not found"
                );
                slots.lock().await[position] = Some(ResolutionOutcome::NotFound);
            }
        }

        let mut ordered_ids = Vec::new();
        let mut not_found = Vec::new();
        {
            let slots = slots.lock().await;
            for (position, slot) in slots.iter().enumerate() {
                match slot {
                    Some(ResolutionOutcome::Found(id)) => ordered_ids.push(id.clone()),
                    Some(ResolutionOutcome::NotFound) => not_found.push(tracks[position].clone()),
                    None => {
                        // Only reachable if a task was torn down before
                        // writing its slot.
                        warn!(position, "missing outcome slot; marking track as not found");
                        not_found.push(tracks[position].clone());
                    }
                }
            }
        }

        info!(
            total,
            transferred = ordered_ids.len(),
            missing = not_found.len(),
            "resolution batch complete"
        );

        ResolutionReport {
            ordered_ids,
            not_found,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::resolver::SongCatalog;
    use crate::track::SongId;
    use async_trait::async_trait;

    /// Catalog that panics if it is ever called.
    struct UnreachableCatalog;

    #[async_trait]
    impl SongCatalog for UnreachableCatalog {
        async fn search_song(&self, term: &str) -> Result<Option<SongId>, CatalogError> {
            panic!("unexpected catalog call for term '{term}'");
        }
    }

    #[tokio::test]
    async fn empty_batch_makes_no_catalog_calls() {
        let resolver = Arc::new(TrackResolver::new(Arc::new(UnreachableCatalog)));
        let orchestrator = Orchestrator::new(resolver);

        let report = orchestrator
            .resolve_all(Vec::new(), ResolveOptions::default())
            .await;

        assert_eq!(report.total, 0);
        assert!(report.ordered_ids.is_empty());
        assert!(report.not_found.is_empty());
        assert_eq!(report.success_rate(), 0.0);
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped_to_one() {
        struct AlwaysHit;

        #[async_trait]
        impl SongCatalog for AlwaysHit {
            async fn search_song(&self, _term: &str) -> Result<Option<SongId>, CatalogError> {
                Ok(Some(SongId::new("id")))
            }
        }

        let resolver = Arc::new(TrackResolver::new(Arc::new(AlwaysHit)));
        let orchestrator = Orchestrator::new(resolver);
        let options = ResolveOptions {
            max_concurrency: 0,
            deadline: None,
        };

        let report = orchestrator
            .resolve_all(vec![Track::new("Song A", "Artist X", "")], options)
            .await;
        assert_eq!(report.transferred(), 1);
    }
}
