//! Typed views over the loosely-schemed documents in the store.
//!
//! The store enforces no schema, so every knowable field is optional and
//! anything the caller supplied beyond that is preserved verbatim in the
//! flattened `extra` map. Serialization skips `None` fields so that
//! inserts and responses never grow null placeholders the caller did not
//! send.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A news category. The API exposes no writes for categories, so these
/// records only ever travel store-to-caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Category {
    /// Store-assigned primary id, rendered as its hex string.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A news article. Created by POST /post-news, merged in place by
/// PATCH /update-news, removed by DELETE /delete-news.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewsArticle {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Author identifier; matches `User::user_id`, not the store id.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Opaque publication date. Ordering is delegated to the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    /// Title, body and whatever else the caller sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user record. Never created explicitly; a role upsert against an
/// unknown `userId` silently creates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Caller-supplied author identifier.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
