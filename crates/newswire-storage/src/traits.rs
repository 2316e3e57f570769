//! The storage trait all Newswire backends implement.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::types::{DeleteOutcome, Filter, FindOptions, InsertOutcome, Projection, UpdateOutcome};

/// A document store exposing the narrow per-collection interface the API
/// consumes. Implementations must be thread-safe (`Send + Sync`); a
/// single instance is shared by every concurrent request.
///
/// Ordering and isolation between concurrent operations are delegated
/// entirely to the backend. There is no transaction, retry, or timeout
/// surface here because the API defines none.
///
/// # Example
///
/// ```ignore
/// use newswire_storage::{DocumentStore, Filter, FindOptions, Sort};
///
/// async fn latest_news(store: &dyn DocumentStore) -> Result<Vec<serde_json::Value>, StoreError> {
///     store
///         .find("news", Filter::All, FindOptions::sorted(Sort::descending("date")))
///         .await
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Finds all documents matching `filter`, optionally sorted
    /// server-side.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues or an unparseable
    /// primary-id filter. An empty result is not an error.
    async fn find(
        &self,
        collection: &str,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Value>, StoreError>;

    /// Finds a single document matching `filter`, optionally projected
    /// down to a subset of fields.
    ///
    /// Returns `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedId` if an id filter cannot be
    /// parsed by the backend; infrastructure errors otherwise.
    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
        projection: Option<Projection>,
    ) -> Result<Option<Value>, StoreError>;

    /// Inserts a new document and returns the store-assigned id.
    ///
    /// The document is taken as-is; no schema is enforced.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the document cannot be
    /// represented by the backend; infrastructure errors otherwise.
    async fn insert_one(&self, collection: &str, document: Value) -> Result<InsertOutcome, StoreError>;

    /// Merges `fields` into the document matching `filter`, field by
    /// field, leaving unmentioned fields untouched.
    ///
    /// With `upsert` set, a missing match creates a new document from
    /// the filter plus `fields`. Both PATCH endpoints rely on this
    /// create-if-absent contract.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedId` for an unparseable id filter;
    /// infrastructure errors otherwise.
    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        fields: Value,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Deletes the first document matching `filter`.
    ///
    /// Deleting a missing document is not an error; the outcome reports
    /// a zero count.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MalformedId` for an unparseable id filter;
    /// infrastructure errors otherwise.
    async fn delete_one(&self, collection: &str, filter: Filter) -> Result<DeleteOutcome, StoreError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that DocumentStore is object-safe
    fn _assert_store_object_safe(_: &dyn DocumentStore) {}
}
