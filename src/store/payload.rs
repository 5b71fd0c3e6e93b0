//! Payload schema for stored chunk points

use qdrant_client::qdrant::{PointStruct, Value as QdrantValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// A chunk ready to be upserted into the vector store
#[derive(Debug, Clone)]
pub struct ChunkPoint {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: ChunkPayload,
}

impl ChunkPoint {
    /// Convert to qdrant-client PointStruct
    pub fn to_point_struct(self) -> PointStruct {
        let payload_map = self.payload.to_qdrant_payload();
        PointStruct::new(self.id.to_string(), self.vector, payload_map)
    }
}

/// Payload stored with each chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Chunk text (document text segment, prefixed with the description)
    pub text: String,

    /// Source document filename (the corpus-level natural key)
    pub filename: String,

    /// Free-text description supplied at upload time
    pub description: String,

    /// RFC 3339 upload timestamp
    pub uploaded_at: String,
}

impl ChunkPayload {
    pub fn new(text: String, filename: String, description: String, uploaded_at: String) -> Self {
        Self {
            text,
            filename,
            description,
            uploaded_at,
        }
    }

    /// Convert to Qdrant payload format
    pub fn to_qdrant_payload(self) -> HashMap<String, QdrantValue> {
        let mut map = HashMap::new();
        map.insert("text".to_string(), string_to_qdrant(&self.text));
        map.insert("filename".to_string(), string_to_qdrant(&self.filename));
        map.insert(
            "description".to_string(),
            string_to_qdrant(&self.description),
        );
        map.insert(
            "uploaded_at".to_string(),
            string_to_qdrant(&self.uploaded_at),
        );
        map
    }
}

impl From<Map<String, Value>> for ChunkPayload {
    fn from(map: Map<String, Value>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            text: get("text"),
            filename: get("filename"),
            description: get("description"),
            uploaded_at: get("uploaded_at"),
        }
    }
}

fn string_to_qdrant(s: &str) -> QdrantValue {
    QdrantValue {
        kind: Some(qdrant_client::qdrant::value::Kind::StringValue(
            s.to_string(),
        )),
    }
}
