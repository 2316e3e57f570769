//! Filter, sort, projection, and outcome types shared by all backends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selects which documents an operation applies to.
///
/// The API only ever issues three filter shapes: everything, a lookup
/// by the store's primary id, and a single-field equality match. Richer
/// query composition is deliberately out of scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Match every document in the collection.
    All,
    /// Match by the store-assigned primary id (`_id`). Backends decide
    /// how to interpret the string; MongoDB parses it as an ObjectId
    /// and rejects malformed input.
    Id(String),
    /// Match documents whose `field` equals `value`.
    Eq { field: String, value: Value },
}

impl Filter {
    /// Equality filter on a named field.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Primary-id filter.
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }
}

/// Direction of a server-side sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A single-field server-side sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
        }
    }

    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }
}

/// Options for a multi-document find.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub sort: Option<Sort>,
}

impl FindOptions {
    /// Find with a server-side sort applied.
    #[must_use]
    pub fn sorted(sort: Sort) -> Self {
        Self { sort: Some(sort) }
    }
}

/// A store-side projection limiting which fields a find-one returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Fields to include in the result.
    pub include: Vec<String>,
    /// Whether the primary id is included alongside them.
    pub with_id: bool,
}

impl Projection {
    /// Include only the named fields, keeping the primary id.
    #[must_use]
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: fields.into_iter().map(Into::into).collect(),
            with_id: true,
        }
    }

    /// Drop the primary id from the projected result.
    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.with_id = false;
        self
    }
}

/// Outcome of an insert, in the driver-result wire shape the API
/// forwards to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    /// The store-assigned primary id of the new document.
    pub inserted_id: String,
}

/// Outcome of an update-or-upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    /// Set when the upsert created a document instead of matching one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}
