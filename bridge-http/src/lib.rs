//! HTTP Client Abstraction
//!
//! Narrow async HTTP seam shared by every API client in the workspace.
//! Library crates depend only on the [`HttpClient`] trait, which keeps them
//! testable with scripted in-memory implementations; the binary injects the
//! reqwest-backed [`ReqwestHttpClient`].

pub mod error;
pub mod http;
pub mod reqwest_client;

pub use error::{HttpError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use reqwest_client::ReqwestHttpClient;
