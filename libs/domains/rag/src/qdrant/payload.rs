//! Mapping between [`Document`] and Qdrant point ids and payloads.
//!
//! Payload layout: `content`, `source`, `created` (RFC 3339) and `metadata`
//! as one nested struct of string values.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use qdrant_client::qdrant::{self, PointId, Value as QdrantValue, point_id::PointIdOptions, value::Kind};

use crate::models::Document;

pub const CONTENT: &str = "content";
pub const SOURCE: &str = "source";
pub const CREATED: &str = "created";
pub const METADATA: &str = "metadata";

/// Canonical numeric ids become integer point ids, anything else is sent as a
/// UUID string. `"007"` or `"+5"` stay strings so the id reads back unchanged.
pub fn to_point_id(id: &str) -> PointId {
    match id.parse::<u64>() {
        Ok(num) if num.to_string() == id => PointId::from(num),
        _ => PointId::from(id.to_string()),
    }
}

pub fn from_point_id(point_id: &PointId) -> Option<String> {
    match &point_id.point_id_options {
        Some(PointIdOptions::Uuid(uuid)) => Some(uuid.clone()),
        Some(PointIdOptions::Num(num)) => Some(num.to_string()),
        None => None,
    }
}

fn string_value(value: impl Into<String>) -> QdrantValue {
    QdrantValue {
        kind: Some(Kind::StringValue(value.into())),
    }
}

pub fn to_payload(document: &Document) -> HashMap<String, QdrantValue> {
    let metadata = document
        .metadata
        .iter()
        .map(|(key, value)| (key.clone(), string_value(value.as_str())))
        .collect();

    HashMap::from([
        (CONTENT.to_string(), string_value(document.content.as_str())),
        (SOURCE.to_string(), string_value(document.source.as_str())),
        (CREATED.to_string(), string_value(document.created.to_rfc3339())),
        (
            METADATA.to_string(),
            QdrantValue {
                kind: Some(Kind::StructValue(qdrant::Struct { fields: metadata })),
            },
        ),
    ])
}

fn as_string(value: &QdrantValue) -> Option<String> {
    match &value.kind {
        Some(Kind::StringValue(s)) => Some(s.clone()),
        Some(Kind::IntegerValue(i)) => Some(i.to_string()),
        Some(Kind::DoubleValue(f)) => Some(f.to_string()),
        Some(Kind::BoolValue(b)) => Some(b.to_string()),
        _ => None,
    }
}

/// Rebuilds a document from a stored payload. Missing fields fall back to
/// empty values; `created` falls back to now.
pub fn to_document(id: String, payload: &HashMap<String, QdrantValue>) -> Document {
    let text = |key: &str| payload.get(key).and_then(as_string).unwrap_or_default();

    let metadata: BTreeMap<String, String> = match payload.get(METADATA).map(|v| &v.kind) {
        Some(Some(Kind::StructValue(s))) => s
            .fields
            .iter()
            .filter_map(|(key, value)| as_string(value).map(|v| (key.clone(), v)))
            .collect(),
        _ => BTreeMap::new(),
    };

    let created = payload
        .get(CREATED)
        .and_then(as_string)
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Document {
        id,
        content: text(CONTENT),
        source: text(SOURCE),
        metadata,
        created,
    }
}
