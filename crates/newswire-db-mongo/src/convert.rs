//! JSON <-> BSON conversion.
//!
//! Documents cross this backend as `serde_json::Value`. Going in,
//! serde maps JSON straight onto BSON. Coming out, ObjectId is rendered
//! as its plain hex string and DateTime as RFC 3339, which matches the
//! wire shape callers of this API have always seen (relaxed extended
//! JSON would wrap them in `{"$oid": ...}` / `{"$date": ...}` instead).

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Number, Value};

use newswire_storage::StoreError;

/// Converts a JSON object into a BSON document.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if `value` is not an object or
/// contains something BSON cannot represent.
pub fn json_to_document(value: &Value) -> Result<Document, StoreError> {
    mongodb::bson::to_document(value).map_err(|e| StoreError::serialization(e.to_string()))
}

/// Converts a single JSON value into a BSON value for use in a filter.
pub fn json_to_bson(value: &Value) -> Result<Bson, StoreError> {
    mongodb::bson::to_bson(value).map_err(|e| StoreError::serialization(e.to_string()))
}

/// Converts a BSON document back into plain JSON.
pub fn document_to_json(doc: Document) -> Value {
    let mut out = Map::new();
    for (key, value) in doc {
        out.insert(key, bson_to_json(value));
    }
    Value::Object(out)
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::Number(n.into()),
        Bson::Int64(n) => Value::Number(n.into()),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::Null => Value::Null,
        // Decimal128, timestamps, binary and the rest never occur in
        // these collections; fall back to the driver's JSON mapping.
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId, DateTime};
    use serde_json::json;

    #[test]
    fn object_id_renders_as_hex_string() {
        let oid = ObjectId::new();
        let doc = doc! { "_id": oid, "title": "x" };
        let value = document_to_json(doc);
        assert_eq!(value["_id"], json!(oid.to_hex()));
        assert_eq!(value["title"], "x");
    }

    #[test]
    fn datetime_renders_as_rfc3339() {
        let doc = doc! { "date": DateTime::from_millis(0) };
        let value = document_to_json(doc);
        assert_eq!(value["date"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn nested_documents_and_arrays_convert_recursively() {
        let oid = ObjectId::new();
        let doc = doc! {
            "refs": [ { "id": oid }, 2_i64 ],
            "meta": { "flag": true }
        };
        let value = document_to_json(doc);
        assert_eq!(value["refs"][0]["id"], json!(oid.to_hex()));
        assert_eq!(value["refs"][1], 2);
        assert_eq!(value["meta"]["flag"], true);
    }

    #[test]
    fn json_to_document_rejects_non_objects() {
        let err = json_to_document(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
    }

    #[test]
    fn json_round_trips_through_bson() {
        let value = json!({ "categoryId": 5, "title": "t", "tags": ["a", "b"] });
        let doc = json_to_document(&value).unwrap();
        assert_eq!(document_to_json(doc), value);
    }
}
