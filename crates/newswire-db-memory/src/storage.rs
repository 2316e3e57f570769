//! The in-memory store and its document-matching helpers.

use std::cmp::Ordering;

use dashmap::DashMap;
use serde_json::{Map, Value};

use newswire_storage::{Filter, Projection, Sort, SortOrder};

/// An in-memory document store.
///
/// Collections are created lazily on first write. Each document is a
/// JSON object carrying its primary id under `_id` as a plain string.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(crate) collections: DashMap<String, Vec<Value>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a collection with documents, assigning ids where missing.
    /// Test convenience; goes through no filtering or validation.
    pub fn seed<I>(&self, collection: &str, documents: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let mut entry = self.collections.entry(collection.to_string()).or_default();
        for mut doc in documents {
            ensure_id(&mut doc);
            entry.push(doc);
        }
    }
}

/// Generates a fresh primary id. Uuid simple format keeps ids opaque
/// strings, which is all the trait promises.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub(crate) fn ensure_id(doc: &mut Value) {
    if let Some(obj) = doc.as_object_mut()
        && !obj.contains_key("_id")
    {
        obj.insert("_id".to_string(), Value::String(generate_id()));
    }
}

/// Whether `doc` matches `filter`. Field comparison is plain JSON
/// equality; the id filter compares `_id` as a string.
pub(crate) fn matches(doc: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Id(id) => doc.get("_id").and_then(Value::as_str) == Some(id.as_str()),
        Filter::Eq { field, value } => doc.get(field) == Some(value),
    }
}

/// Seed document for an upsert that matched nothing: the filter's
/// equality constraints plus the `$set` fields, as MongoDB builds it.
pub(crate) fn upsert_seed(filter: &Filter) -> Map<String, Value> {
    let mut obj = Map::new();
    match filter {
        Filter::All => {}
        Filter::Id(id) => {
            obj.insert("_id".to_string(), Value::String(id.clone()));
        }
        Filter::Eq { field, value } => {
            obj.insert(field.clone(), value.clone());
        }
    }
    obj
}

/// Sorts documents by a single field, missing values last.
pub(crate) fn sort_documents(docs: &mut [Value], sort: &Sort) {
    docs.sort_by(|a, b| {
        let ordering = match (a.get(&sort.field), b.get(&sort.field)) {
            (Some(left), Some(right)) => compare_values(left, right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Compares two JSON values the way a sort key would: numbers
/// numerically, strings lexicographically, mixed types by type rank.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::Bool(_) => 5,
    }
}

/// Applies a projection to a document.
pub(crate) fn project(doc: &Value, projection: &Projection) -> Value {
    let mut out = Map::new();
    if let Some(obj) = doc.as_object() {
        if projection.with_id
            && let Some(id) = obj.get("_id")
        {
            out.insert("_id".to_string(), id.clone());
        }
        for field in &projection.include {
            if let Some(value) = obj.get(field) {
                out.insert(field.clone(), value.clone());
            }
        }
    }
    Value::Object(out)
}
