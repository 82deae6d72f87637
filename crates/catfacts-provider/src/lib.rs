//! HTTP fact source for catfacts.
//!
//! [`HttpFactProvider`] issues one `GET` per attempt against an endpoint that
//! answers with `{"fact": "..."}`. Retry, timeout and back-off are handled by
//! [`FactProvider::fetch`](catfacts_core::provider::FactProvider::fetch).

pub mod error;
mod http;

pub use error::{Error, Result};
pub use http::{DEFAULT_SOURCE_URL, HttpFactProvider};
