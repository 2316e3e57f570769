//! MongoDB implementation of the DocumentStore trait.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::Database;
use serde_json::Value;

use newswire_storage::{
    DeleteOutcome, DocumentStore, Filter, FindOptions, InsertOutcome, Projection, SortOrder,
    StoreError, UpdateOutcome,
};

use crate::client;
use crate::config::MongoConfig;
use crate::convert::{document_to_json, json_to_bson, json_to_document};

/// MongoDB storage backend.
///
/// Holds a single `Database` handle, opened once at startup and safe
/// for unlimited concurrent operations; the driver multiplexes over its
/// own connection pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connects to MongoDB with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the cluster cannot be
    /// reached or refuses the credentials.
    pub async fn new(config: MongoConfig) -> Result<Self, StoreError> {
        let database = client::connect(&config).await?;
        Ok(Self { database })
    }

    /// Creates a `MongoStore` from an already-connected database handle.
    #[must_use]
    pub fn from_database(database: Database) -> Self {
        Self { database }
    }
}

/// Translates a `Filter` into a MongoDB filter document.
///
/// An id filter must parse as a hex ObjectId; malformed input is
/// rejected here, which is what surfaces a caller-supplied garbage id
/// as a store failure rather than an empty result.
fn filter_to_document(filter: &Filter) -> Result<Document, StoreError> {
    match filter {
        Filter::All => Ok(doc! {}),
        Filter::Id(id) => {
            let oid =
                ObjectId::parse_str(id).map_err(|_| StoreError::malformed_id(id.clone()))?;
            Ok(doc! { "_id": oid })
        }
        Filter::Eq { field, value } => {
            let mut doc = Document::new();
            doc.insert(field.clone(), json_to_bson(value)?);
            Ok(doc)
        }
    }
}

fn projection_to_document(projection: &Projection) -> Document {
    let mut doc = Document::new();
    if !projection.with_id {
        doc.insert("_id", 0_i32);
    }
    for field in &projection.include {
        doc.insert(field.clone(), 1_i32);
    }
    doc
}

fn bson_id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: &str,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Value>, StoreError> {
        let coll = self.database.collection::<Document>(collection);
        let filter = filter_to_document(&filter)?;

        let mut find = coll.find(filter);
        if let Some(sort) = &options.sort {
            let direction = match sort.order {
                SortOrder::Ascending => 1_i32,
                SortOrder::Descending => -1_i32,
            };
            let mut sort_doc = Document::new();
            sort_doc.insert(sort.field.clone(), direction);
            find = find.sort(sort_doc);
        }

        let docs: Vec<Document> = find
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
        projection: Option<Projection>,
    ) -> Result<Option<Value>, StoreError> {
        let coll = self.database.collection::<Document>(collection);
        let filter = filter_to_document(&filter)?;

        let mut find_one = coll.find_one(filter);
        if let Some(projection) = &projection {
            find_one = find_one.projection(projection_to_document(projection));
        }

        let doc = find_one
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(doc.map(document_to_json))
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Value,
    ) -> Result<InsertOutcome, StoreError> {
        let coll = self.database.collection::<Document>(collection);
        let doc = json_to_document(&document)?;

        let result = coll
            .insert_one(doc)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: bson_id_to_string(result.inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        fields: Value,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let coll = self.database.collection::<Document>(collection);
        let filter = filter_to_document(&filter)?;
        let set_fields = json_to_document(&fields)?;

        let result = coll
            .update_one(filter, doc! { "$set": set_fields })
            .upsert(upsert)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(bson_id_to_string),
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<DeleteOutcome, StoreError> {
        let coll = self.database.collection::<Document>(collection);
        let filter = filter_to_document(&filter)?;

        let result = coll
            .delete_one(filter)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
