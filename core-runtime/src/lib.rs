//! # Runtime Support
//!
//! Process-level concerns shared by the migration run: environment-loaded
//! configuration and tracing initialization.
//!
//! Configuration follows a load-once lifecycle: read and validated at
//! startup before any network call, held read-only for the run, discarded at
//! process exit. Nothing here persists secrets.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, LimitSettings};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
