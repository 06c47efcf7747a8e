//! Shallow structural matching of a datum against one schema.

use crate::blueprint::{Schema, SchemaType};
use crate::datum::RawDatum;
use crate::schema::SchemaRepository;
use tracing::trace;

/// Reference chains longer than this are treated as cyclic.
const MAX_REF_HOPS: usize = 64;

/// Whether the outer shape of `datum` fits `schema`.
///
/// Only the outermost layer is compared: list items and constructor fields
/// are not inspected, and a constructor's tag is not checked against the
/// schema's index. Unresolvable references do not match.
pub fn matches(datum: &RawDatum, schema: &Schema, repo: &SchemaRepository) -> bool {
    matches_within(datum, schema, repo, MAX_REF_HOPS)
}

fn matches_within(datum: &RawDatum, schema: &Schema, repo: &SchemaRepository, hops: usize) -> bool {
    match (&schema.kind, datum) {
        (SchemaType::Ref(reference), _) => {
            if hops == 0 {
                trace!(reference = %reference, "reference chain too deep");
                return false;
            }
            match repo.resolve(reference) {
                Ok(resolved) => matches_within(datum, resolved, repo, hops - 1),
                Err(e) => {
                    trace!(error = %e, "unresolved reference does not match");
                    false
                }
            }
        }
        (SchemaType::Any, _) => true,
        (SchemaType::Bytes, RawDatum::ByteString(_)) => true,
        (SchemaType::Integer, RawDatum::Integer(_)) => true,
        (SchemaType::List(_), RawDatum::List(_)) => true,
        (SchemaType::Constructor { .. }, RawDatum::Constructor { .. }) => true,
        (SchemaType::AnyOf(alternatives), _) => alternatives
            .iter()
            .any(|alt| matches_within(datum, alt, repo, hops)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::ListItems;

    fn schema(kind: SchemaType) -> Schema {
        Schema::new(kind)
    }

    fn constructor(index: u64, fields: Vec<Schema>) -> Schema {
        schema(SchemaType::Constructor { index, fields })
    }

    #[test]
    fn test_primitive_shapes() {
        let repo = SchemaRepository::new();
        let int = RawDatum::integer(3);
        let bytes = RawDatum::bytes("ff");

        assert!(matches(&int, &schema(SchemaType::Integer), &repo));
        assert!(!matches(&int, &schema(SchemaType::Bytes), &repo));
        assert!(matches(&bytes, &schema(SchemaType::Bytes), &repo));
        assert!(!matches(&bytes, &schema(SchemaType::Integer), &repo));
    }

    #[test]
    fn test_list_is_shallow() {
        let repo = SchemaRepository::new();
        let list = RawDatum::List(vec![RawDatum::bytes("ab")]);
        let ints = schema(SchemaType::List(ListItems::Each(Box::new(schema(
            SchemaType::Integer,
        )))));
        assert!(matches(&list, &ints, &repo));
        assert!(!matches(&RawDatum::integer(1), &ints, &repo));
    }

    #[test]
    fn test_constructor_ignores_tag_and_fields() {
        let repo = SchemaRepository::new();
        let datum = RawDatum::Constructor {
            tag: 5,
            fields: vec![RawDatum::integer(1), RawDatum::integer(2)],
        };
        assert!(matches(&datum, &constructor(0, vec![]), &repo));
    }

    #[test]
    fn test_any_of() {
        let repo = SchemaRepository::new();
        let either = schema(SchemaType::AnyOf(vec![
            schema(SchemaType::Bytes),
            constructor(0, vec![]),
        ]));
        assert!(matches(&RawDatum::bytes("00"), &either, &repo));
        assert!(!matches(&RawDatum::integer(0), &either, &repo));
    }

    #[test]
    fn test_ref_resolves() {
        let repo = SchemaRepository::from_definitions(vec![(
            "aiken/Int".to_string(),
            schema(SchemaType::Integer),
        )]);
        let reference = schema(SchemaType::Ref("#/definitions/aiken~1Int".into()));
        assert!(matches(&RawDatum::integer(9), &reference, &repo));
        assert!(!matches(&RawDatum::bytes("09"), &reference, &repo));
    }

    #[test]
    fn test_missing_ref_fails_closed() {
        let repo = SchemaRepository::new();
        let reference = schema(SchemaType::Ref("#/definitions/Missing".into()));
        assert!(!matches(&RawDatum::integer(9), &reference, &repo));
    }

    #[test]
    fn test_cyclic_ref_fails_closed() {
        let repo = SchemaRepository::from_definitions(vec![(
            "Loop".to_string(),
            schema(SchemaType::Ref("#/definitions/Loop".into())),
        )]);
        let reference = schema(SchemaType::Ref("#/definitions/Loop".into()));
        assert!(!matches(&RawDatum::integer(1), &reference, &repo));
    }

    #[test]
    fn test_any_matches_everything() {
        let repo = SchemaRepository::new();
        let any = schema(SchemaType::Any);
        assert!(matches(&RawDatum::Null, &any, &repo));
        assert!(matches(&RawDatum::List(vec![]), &any, &repo));
    }

    #[test]
    fn test_null_matches_nothing_typed() {
        let repo = SchemaRepository::new();
        assert!(!matches(&RawDatum::Null, &schema(SchemaType::Integer), &repo));
    }
}
