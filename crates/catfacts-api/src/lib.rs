//! JSON REST API for catfacts.
//!
//! Exposes an axum [`Router`] backed by any [`catfacts_core::store::FactStore`].
//! CORS, tracing and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = catfacts_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
//! ```

pub mod error;
pub mod facts;

use std::sync::Arc;

use axum::{Router, response::Redirect, routing::get};
use catfacts_core::store::FactStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FactStore + 'static,
{
  Router::new()
    .route("/", get(|| async { Redirect::temporary("/facts") }))
    .route("/facts", get(facts::list::<S>).post(facts::create::<S>))
    .route("/facts/random", get(facts::random::<S>))
    .with_state(store)
}
