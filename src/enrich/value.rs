//! Enriched value tree.

use crate::datum::{RawDatum, integer_to_json};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Coarse type of an enriched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    String,
    Integer,
    List,
    Constructor,
    Unknown,
}

/// Payload of an enriched node.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichedData {
    /// Hex of a byte string.
    Text(String),
    Integer(BigInt),
    /// Left as decoded: lists no schema matched, and unknown shapes.
    Raw(RawDatum),
    /// A list whose items were named by a schema, in schema order.
    Record(Vec<(String, Enriched)>),
    Constructor { tag: u64, fields: Vec<Enriched> },
}

/// A node produced by the enricher.
#[derive(Debug, Clone, PartialEq)]
pub struct Enriched {
    pub value: EnrichedData,
    pub type_name: TypeName,
}

impl Enriched {
    pub fn new(value: EnrichedData, type_name: TypeName) -> Self {
        Enriched { value, type_name }
    }

    /// JSON with every node wrapped as `{value, typeName}`.
    pub fn to_json(&self) -> JsonValue {
        let value = match &self.value {
            EnrichedData::Record(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
            EnrichedData::Constructor { tag, fields } => serde_json::json!({
                "tag": tag,
                "fields": fields.iter().map(Enriched::to_json).collect::<Vec<_>>(),
            }),
            leaf => leaf_json(leaf),
        };

        let mut wrapper = Map::new();
        wrapper.insert("value".to_string(), value);
        wrapper.insert(
            "typeName".to_string(),
            serde_json::to_value(self.type_name).unwrap_or(JsonValue::Null),
        );
        JsonValue::Object(wrapper)
    }

    /// JSON with every wrapper replaced by its inner value.
    ///
    /// Records stay objects, so a `{numerator, denominator}` pair keeps both
    /// fields visible.
    pub fn to_plain_json(&self) -> JsonValue {
        match &self.value {
            EnrichedData::Record(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_plain_json()))
                    .collect(),
            ),
            EnrichedData::Constructor { tag, fields } => serde_json::json!({
                "tag": tag,
                "fields": fields.iter().map(Enriched::to_plain_json).collect::<Vec<_>>(),
            }),
            leaf => leaf_json(leaf),
        }
    }
}

fn leaf_json(data: &EnrichedData) -> JsonValue {
    match data {
        EnrichedData::Text(hex) => JsonValue::String(hex.clone()),
        EnrichedData::Integer(n) => integer_to_json(n),
        EnrichedData::Raw(datum) => datum.to_json(),
        EnrichedData::Record(_) | EnrichedData::Constructor { .. } => JsonValue::Null,
    }
}

impl Serialize for Enriched {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Outcome of viewing a datum: an enriched tree, or an error to display.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichedValue {
    Enriched(Enriched),
    Error(String),
}

impl EnrichedValue {
    /// Typed JSON form; errors become `{"error": message}`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            EnrichedValue::Enriched(enriched) => enriched.to_json(),
            EnrichedValue::Error(message) => serde_json::json!({ "error": message }),
        }
    }
}

impl From<Enriched> for EnrichedValue {
    fn from(enriched: Enriched) -> Self {
        EnrichedValue::Enriched(enriched)
    }
}
