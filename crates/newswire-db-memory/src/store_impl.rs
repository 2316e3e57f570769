//! Implementation of the DocumentStore trait for InMemoryStore.

use async_trait::async_trait;
use serde_json::Value;

use newswire_storage::{
    DeleteOutcome, DocumentStore, Filter, FindOptions, InsertOutcome, Projection, StoreError,
    UpdateOutcome,
};

use crate::storage::{
    ensure_id, generate_id, matches, project, sort_documents, upsert_seed, InMemoryStore,
};

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Value>, StoreError> {
        let mut docs: Vec<Value> = self
            .collections
            .get(collection)
            .map(|entry| {
                entry
                    .iter()
                    .filter(|doc| matches(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &options.sort {
            sort_documents(&mut docs, sort);
        }

        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
        projection: Option<Projection>,
    ) -> Result<Option<Value>, StoreError> {
        let found = self.collections.get(collection).and_then(|entry| {
            entry
                .iter()
                .find(|doc| matches(doc, &filter))
                .cloned()
        });

        Ok(match (found, projection) {
            (Some(doc), Some(projection)) => Some(project(&doc, &projection)),
            (found, None) => found,
            (None, Some(_)) => None,
        })
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Value,
    ) -> Result<InsertOutcome, StoreError> {
        if !document.is_object() {
            return Err(StoreError::serialization("document must be a JSON object"));
        }

        let mut doc = document;
        ensure_id(&mut doc);
        let inserted_id = doc
            .get("_id")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_default();

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(doc);

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        fields: Value,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let set_fields = match fields {
            Value::Object(map) => map,
            _ => return Err(StoreError::serialization("update fields must be a JSON object")),
        };

        let mut entry = self.collections.entry(collection.to_string()).or_default();

        if let Some(doc) = entry.iter_mut().find(|doc| matches(doc, &filter)) {
            let mut modified = false;
            if let Some(obj) = doc.as_object_mut() {
                for (key, value) in set_fields {
                    if obj.get(&key) != Some(&value) {
                        obj.insert(key, value);
                        modified = true;
                    }
                }
            }
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        }

        // Create-if-absent: filter constraints plus the set fields.
        let mut obj = upsert_seed(&filter);
        for (key, value) in set_fields {
            obj.insert(key, value);
        }
        if !obj.contains_key("_id") {
            obj.insert("_id".to_string(), Value::String(generate_id()));
        }
        let upserted_id = obj
            .get("_id")
            .and_then(Value::as_str)
            .map(String::from);
        entry.push(Value::Object(obj));

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id,
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<DeleteOutcome, StoreError> {
        let deleted = self
            .collections
            .get_mut(collection)
            .and_then(|mut entry| {
                entry
                    .iter()
                    .position(|doc| matches(doc, &filter))
                    .map(|idx| {
                        entry.remove(idx);
                    })
            })
            .is_some();

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: u64::from(deleted),
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
