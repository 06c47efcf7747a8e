//! The schema repository: every loaded definition under one namespace.

use crate::blueprint::{Blueprint, ListItems, Schema, SchemaType};
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Prefix of local definition references.
const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Definitions merged from zero or more blueprints.
///
/// Iteration follows insertion order. A later definition with an existing name
/// replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct SchemaRepository {
    definitions: Vec<(String, Schema)>,
    index: HashMap<String, usize>,
    /// Tuple and homogeneous list schemas, top-level or one `anyOf` deep.
    list_schemas: Vec<Schema>,
}

impl SchemaRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the definitions of `blueprints`, left to right.
    pub fn build<'a>(blueprints: impl IntoIterator<Item = &'a Blueprint>) -> Self {
        Self::from_definitions(
            blueprints
                .into_iter()
                .flat_map(|b| b.definitions.iter().cloned()),
        )
    }

    /// Build from `(name, schema)` pairs; later pairs win on name collision.
    pub fn from_definitions(definitions: impl IntoIterator<Item = (String, Schema)>) -> Self {
        let mut repo = SchemaRepository::new();
        for (name, schema) in definitions {
            match repo.index.get(&name) {
                Some(&slot) => {
                    warn!(name = %name, "definition redefined by a later blueprint");
                    repo.definitions[slot].1 = schema;
                }
                None => {
                    repo.index.insert(name.clone(), repo.definitions.len());
                    repo.definitions.push((name, schema));
                }
            }
        }
        repo.list_schemas = collect_list_schemas(&repo.definitions);
        debug!(
            definitions = repo.definitions.len(),
            list_schemas = repo.list_schemas.len(),
            "schema repository built"
        );
        repo
    }

    /// Look up a definition by its key.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.index.get(name).map(|&slot| &self.definitions[slot].1)
    }

    /// Resolve a `$ref` such as `#/definitions/my~1module~1Foo`.
    pub fn resolve(&self, reference: &str) -> Result<&Schema> {
        let key = definition_key(reference);
        self.get(&key).ok_or(Error::DefinitionNotFound(key))
    }

    /// Definitions in insertion order.
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.definitions.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// List-shaped schemas considered by the enricher, in insertion order.
    pub fn list_schemas(&self) -> &[Schema] {
        &self.list_schemas
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Convert a `$ref` into a repository key.
///
/// Strips `#/definitions/` and unescapes `~1` to `/`.
pub fn definition_key(reference: &str) -> String {
    reference
        .strip_prefix(DEFINITIONS_PREFIX)
        .unwrap_or(reference)
        .replace("~1", "/")
}

fn collect_list_schemas(definitions: &[(String, Schema)]) -> Vec<Schema> {
    let mut lists = Vec::new();
    for (_, schema) in definitions {
        match &schema.kind {
            SchemaType::List(_) => lists.push(schema.clone()),
            // One level only: anyOf inside anyOf is not unwrapped
            SchemaType::AnyOf(alternatives) => lists.extend(
                alternatives
                    .iter()
                    .filter(|alt| matches!(alt.kind, SchemaType::List(_)))
                    .cloned(),
            ),
            _ => {}
        }
    }
    lists
}

/// Positional item schemas of a tuple list schema.
pub(crate) fn tuple_items(schema: &Schema) -> Option<&[Schema]> {
    match &schema.kind {
        SchemaType::List(ListItems::Tuple(items)) => Some(items),
        _ => None,
    }
}
