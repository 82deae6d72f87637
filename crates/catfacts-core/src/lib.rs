//! Core types and trait definitions for the catfacts store.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::FactStore`], fact sources implement
//! [`provider::FactProvider`], and [`import::ImportController`] drives one
//! against the other.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod fact;
pub mod import;
pub mod provider;
pub mod store;

pub use error::{Error, Result};
