//! Storage abstraction for the Newswire document collections.
//!
//! The API consumes a deliberately narrow store interface: per-collection
//! find / find-one / insert / update(upsert) / delete with server-side
//! sorting and field projection. This crate defines that contract; the
//! backends live in `newswire-db-mongo` and `newswire-db-memory`.

pub mod error;
pub mod traits;
pub mod types;

pub use error::StoreError;
pub use traits::DocumentStore;
pub use types::{
    DeleteOutcome, Filter, FindOptions, InsertOutcome, Projection, Sort, SortOrder, UpdateOutcome,
};
