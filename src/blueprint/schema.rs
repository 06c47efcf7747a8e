//! Schema types parsed from blueprint definitions.

use crate::blueprint::document::Violation;
use serde_json::{Map, Value as JsonValue};

/// A schema node together with its optional documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Field or type name; used as the record key when a list is enriched.
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: SchemaType,
}

/// The shape a schema node describes.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    List(ListItems),
    Constructor { index: u64, fields: Vec<Schema> },
    /// Reference to a named definition, e.g. `#/definitions/my~1module~1Foo`.
    Ref(String),
    Bytes,
    Integer,
    AnyOf(Vec<Schema>),
    /// Untyped: `{}` or a data type this viewer does not model.
    Any,
}

/// Element schema(s) of a list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItems {
    /// Every element has the same schema.
    Each(Box<Schema>),
    /// Positional schemas, one per element.
    Tuple(Vec<Schema>),
}

impl Schema {
    /// An undocumented schema of the given kind.
    pub fn new(kind: SchemaType) -> Self {
        Schema {
            title: None,
            description: None,
            kind,
        }
    }

    /// Attach a title.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Short label for listings.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            SchemaType::List(ListItems::Each(_)) => "list",
            SchemaType::List(ListItems::Tuple(_)) => "tuple",
            SchemaType::Constructor { .. } => "constructor",
            SchemaType::Ref(_) => "ref",
            SchemaType::Bytes => "bytes",
            SchemaType::Integer => "integer",
            SchemaType::AnyOf(_) => "anyOf",
            SchemaType::Any => "any",
        }
    }

    /// Parse a schema, recording every problem found under `path`.
    ///
    /// Malformed nodes come back as [`SchemaType::Any`] so that parsing can
    /// continue and report the remaining violations in one pass.
    pub(crate) fn parse(value: &JsonValue, path: &str, violations: &mut Vec<Violation>) -> Schema {
        let Some(object) = value.as_object() else {
            violations.push(Violation::new(path, "schema must be an object"));
            return Schema::new(SchemaType::Any);
        };

        let title = optional_string(object, "title", path, violations);
        let description = optional_string(object, "description", path, violations);
        let kind = parse_kind(object, path, violations);

        Schema {
            title,
            description,
            kind,
        }
    }
}

fn parse_kind(object: &Map<String, JsonValue>, path: &str, violations: &mut Vec<Violation>) -> SchemaType {
    if let Some(reference) = object.get("$ref") {
        return match reference.as_str() {
            Some(r) => SchemaType::Ref(r.to_string()),
            None => {
                violations.push(Violation::new(join(path, "$ref"), "must be a string"));
                SchemaType::Any
            }
        };
    }

    if let Some(alternatives) = object.get("anyOf") {
        let here = join(path, "anyOf");
        return match alternatives.as_array() {
            Some(items) => SchemaType::AnyOf(parse_all(items, &here, violations)),
            None => {
                violations.push(Violation::new(here, "must be an array"));
                SchemaType::Any
            }
        };
    }

    let data_type = match object.get("dataType") {
        None => return SchemaType::Any,
        Some(JsonValue::String(s)) => s.as_str(),
        Some(_) => {
            violations.push(Violation::new(join(path, "dataType"), "must be a string"));
            return SchemaType::Any;
        }
    };

    match data_type {
        "bytes" => SchemaType::Bytes,
        "integer" => SchemaType::Integer,
        "list" => parse_list(object, path, violations),
        "constructor" => parse_constructor(object, path, violations),
        // map, #string, #boolean, ... are accepted but left untyped
        _ => SchemaType::Any,
    }
}

fn parse_list(object: &Map<String, JsonValue>, path: &str, violations: &mut Vec<Violation>) -> SchemaType {
    let here = join(path, "items");
    match object.get("items") {
        Some(JsonValue::Array(items)) => {
            SchemaType::List(ListItems::Tuple(parse_all(items, &here, violations)))
        }
        Some(item @ JsonValue::Object(_)) => {
            SchemaType::List(ListItems::Each(Box::new(Schema::parse(item, &here, violations))))
        }
        // Untyped list
        None => SchemaType::List(ListItems::Each(Box::new(Schema::new(SchemaType::Any)))),
        Some(_) => {
            violations.push(Violation::new(here, "must be a schema or an array of schemas"));
            SchemaType::Any
        }
    }
}

fn parse_constructor(
    object: &Map<String, JsonValue>,
    path: &str,
    violations: &mut Vec<Violation>,
) -> SchemaType {
    let index = match object.get("index") {
        Some(v) => match v.as_u64() {
            Some(i) => Some(i),
            None => {
                violations.push(Violation::new(join(path, "index"), "must be a non-negative integer"));
                None
            }
        },
        None => {
            violations.push(Violation::new(join(path, "index"), "is required"));
            None
        }
    };

    let here = join(path, "fields");
    let fields = match object.get("fields") {
        Some(JsonValue::Array(items)) => Some(parse_all(items, &here, violations)),
        Some(_) => {
            violations.push(Violation::new(here, "must be an array"));
            None
        }
        None => {
            violations.push(Violation::new(here, "is required"));
            None
        }
    };

    match (index, fields) {
        (Some(index), Some(fields)) => SchemaType::Constructor { index, fields },
        _ => SchemaType::Any,
    }
}

fn parse_all(items: &[JsonValue], path: &str, violations: &mut Vec<Violation>) -> Vec<Schema> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Schema::parse(item, &join(path, &i.to_string()), violations))
        .collect()
}

fn optional_string(
    object: &Map<String, JsonValue>,
    key: &str,
    path: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match object.get(key) {
        None => None,
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new(join(path, key), "must be a string"));
            None
        }
    }
}

/// Append a segment to a dotted path.
pub(crate) fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}
