//! # Track Resolution Pipeline
//!
//! The core of the migration: takes the ordered track list from the source
//! playlist and produces, for every track, either a destination catalog
//! identifier or a not-found outcome — under the destination's rate limit,
//! with bounded concurrency, a two-tier fallback search, and strict
//! preservation of input order in the final report.
//!
//! ## Components
//!
//! - [`Track`] / [`SongId`] / [`ResolutionOutcome`] — the data model
//! - [`SongCatalog`] — the seam to the destination catalog's search endpoint
//! - [`TrackResolver`] — one track, two-tier fallback, never fails
//! - [`Orchestrator`] — fans the batch out over a bounded worker pool and
//!   reassembles an order-preserving [`ResolutionReport`]

pub mod error;
pub mod orchestrator;
pub mod report;
pub mod resolver;
pub mod track;

pub use error::CatalogError;
pub use orchestrator::{Orchestrator, ProgressSink, ResolveOptions, DEFAULT_MAX_CONCURRENCY};
pub use report::ResolutionReport;
pub use resolver::{SongCatalog, TrackResolver};
pub use track::{ResolutionOutcome, SongId, Track};
