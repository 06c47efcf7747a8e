//! Recovering field names for positional Plutus data.
//!
//! Plutus data carries no field names: a record is encoded as a plain list.
//! Names come back by finding a tuple list schema of the same arity whose
//! every position fits the corresponding datum. The first such schema in
//! repository order wins. When nothing fits, the list is shown positionally.

use crate::blueprint::{Schema, SchemaType};
use crate::datum::RawDatum;
use crate::enrich::value::{Enriched, EnrichedData, TypeName};
use crate::error::Result;
use crate::schema::{SchemaRepository, matches, tuple_items};
use tracing::{trace, warn};

/// Enrich a raw datum using the repository's schemas.
///
/// Never fails: unmatched lists and unknown shapes are carried through as-is.
pub fn enrich(datum: &RawDatum, repo: &SchemaRepository) -> Enriched {
    match datum {
        RawDatum::ByteString(hex) => Enriched::new(EnrichedData::Text(hex.clone()), TypeName::String),

        RawDatum::Integer(n) => Enriched::new(EnrichedData::Integer(n.clone()), TypeName::Integer),

        RawDatum::List(items) => match find_list_schema(items, repo) {
            Some(positions) => {
                let mut record: Vec<(String, Enriched)> = Vec::with_capacity(items.len());
                for (i, (item, position)) in items.iter().zip(positions).enumerate() {
                    let key = record_key(position.title.as_deref(), i, &record);
                    record.push((key, enrich(item, repo)));
                }
                Enriched::new(EnrichedData::Record(record), TypeName::List)
            }
            None => Enriched::new(EnrichedData::Raw(datum.clone()), TypeName::List),
        },

        RawDatum::Constructor { tag, fields } => Enriched::new(
            EnrichedData::Constructor {
                tag: *tag,
                fields: fields.iter().map(|f| enrich(f, repo)).collect(),
            },
            TypeName::Constructor,
        ),

        RawDatum::Null => Enriched::new(EnrichedData::Raw(datum.clone()), TypeName::Unknown),
    }
}

/// Record key for position `index`: its title, or the index when the title is
/// missing or already taken. Keys stay unique so no item is lost in JSON.
fn record_key(title: Option<&str>, index: usize, taken: &[(String, Enriched)]) -> String {
    let is_free = |key: &str| taken.iter().all(|(k, _)| k != key);

    if let Some(title) = title.filter(|t| is_free(*t)) {
        return title.to_string();
    }
    if let Some(title) = title {
        trace!(title, index, "repeated field title, keying by position");
    }

    let mut key = index.to_string();
    let mut suffix = 1;
    while !is_free(key.as_str()) {
        key = format!("{}_{}", index, suffix);
        suffix += 1;
    }
    key
}

/// First tuple schema of matching arity whose every position fits.
fn find_list_schema<'r>(items: &[RawDatum], repo: &'r SchemaRepository) -> Option<&'r [Schema]> {
    let found = repo
        .list_schemas()
        .iter()
        .filter_map(tuple_items)
        .filter(|positions| positions.len() == items.len())
        .find(|positions| fits(items, positions, repo));

    match found {
        Some(_) => trace!(arity = items.len(), "list schema matched"),
        None => trace!(arity = items.len(), "no list schema matched, keeping positions"),
    }
    found
}

fn fits(items: &[RawDatum], positions: &[Schema], repo: &SchemaRepository) -> bool {
    items.iter().zip(positions).all(|(item, position)| {
        match resolve_position(position, repo) {
            Ok(schema) => matches(item, schema, repo),
            Err(e) => {
                warn!(error = %e, "list schema references a missing definition");
                false
            }
        }
    })
}

/// Follow a position's `$ref`; missing definitions are errors here.
fn resolve_position<'r>(position: &'r Schema, repo: &'r SchemaRepository) -> Result<&'r Schema> {
    match &position.kind {
        SchemaType::Ref(reference) => repo.resolve(reference),
        _ => Ok(position),
    }
}
