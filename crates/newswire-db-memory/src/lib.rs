//! In-memory implementation of the Newswire `DocumentStore` trait.
//!
//! Backs the endpoint tests and local development. Semantics mirror the
//! MongoDB backend for the narrow interface the API uses: single-field
//! equality filters, single-field sorts, field projection, `$set`-style
//! merge updates with upsert, and delete-one.

pub mod storage;
mod store_impl;

pub use storage::InMemoryStore;
