//! # Destination Catalog Client
//!
//! Talks to the destination music API on behalf of the migration:
//! catalog search (implementing the resolution pipeline's [`SongCatalog`]
//! seam), a one-shot user-token validation at startup, and the final
//! playlist-creation call.
//!
//! Search requests authenticate with the app-level developer token only; the
//! user-scoped token is attached solely to library operations
//! (verification and playlist creation).
//!
//! [`SongCatalog`]: core_resolve::SongCatalog

pub mod connector;
pub mod error;
pub mod types;

pub use connector::{AppleMusicClient, DEFAULT_STOREFRONT};
pub use error::{AppleMusicError, Result};
pub use types::CreatedPlaylist;
