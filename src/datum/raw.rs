//! The raw datum model and the constructor tag encoding.

use crate::error::{Error, Result};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Highest constructor alternative the compact tag encoding can carry.
pub const MAX_ALTERNATIVE: u64 = 127;

/// First tag of the compact range for alternatives 0..=6.
const COMPACT_TAG_BASE: u64 = 121;
/// First tag of the extended range for alternatives 7..=127.
const EXTENDED_TAG_BASE: u64 = 1280;
/// Number of alternatives covered by the compact range.
const COMPACT_ALTERNATIVES: u64 = 7;
/// Number of tags reserved for the extended range.
const EXTENDED_TAGS: u64 = 128;

/// Plutus data decoded into its canonical shape, prior to any schema lookup.
///
/// Byte strings and text both collapse to lowercase hex; there is no separate
/// string variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDatum {
    Null,
    Integer(BigInt),
    ByteString(String),
    List(Vec<RawDatum>),
    /// `tag` is the decoded alternative index, never the CBOR tag number.
    Constructor { tag: u64, fields: Vec<RawDatum> },
}

impl RawDatum {
    /// Convenience constructor for integer leaves.
    pub fn integer(value: impl Into<BigInt>) -> Self {
        RawDatum::Integer(value.into())
    }

    /// Convenience constructor for byte string leaves from hex text.
    pub fn bytes(hex: impl Into<String>) -> Self {
        RawDatum::ByteString(hex.into().to_lowercase())
    }

    /// JSON form: constructors become `{tag, fields}`, everything else maps directly.
    pub fn to_json(&self) -> JsonValue {
        match self {
            RawDatum::Null => JsonValue::Null,
            RawDatum::Integer(n) => integer_to_json(n),
            RawDatum::ByteString(hex) => JsonValue::String(hex.clone()),
            RawDatum::List(items) => JsonValue::Array(items.iter().map(RawDatum::to_json).collect()),
            RawDatum::Constructor { tag, fields } => serde_json::json!({
                "tag": tag,
                "fields": fields.iter().map(RawDatum::to_json).collect::<Vec<_>>(),
            }),
        }
    }
}

impl Serialize for RawDatum {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Exact JSON number for an arbitrary-precision integer.
pub fn integer_to_json(n: &BigInt) -> JsonValue {
    let digits = n.to_string();
    match digits.parse::<serde_json::Number>() {
        Ok(number) => JsonValue::Number(number),
        // Unreachable for decimal digits, kept lossless anyway
        Err(_) => JsonValue::String(digits),
    }
}

/// Map a CBOR constructor tag to its alternative index.
///
/// Tags 121..=127 carry alternatives 0..=6 and tags 1280..=1400 carry 7..=127.
/// The rest of the extended tag block decodes to indices the viewer cannot
/// represent.
pub fn alternative_from_tag(tag: u64) -> Result<u64> {
    match tag {
        t if (COMPACT_TAG_BASE..COMPACT_TAG_BASE + COMPACT_ALTERNATIVES).contains(&t) => {
            Ok(t - COMPACT_TAG_BASE)
        }
        t if (EXTENDED_TAG_BASE..EXTENDED_TAG_BASE + EXTENDED_TAGS).contains(&t) => {
            let alternative = t - EXTENDED_TAG_BASE + COMPACT_ALTERNATIVES;
            if alternative > MAX_ALTERNATIVE {
                Err(Error::UnsupportedConstructorArity(alternative))
            } else {
                Ok(alternative)
            }
        }
        t => Err(Error::InvalidConstructorTag(t)),
    }
}

/// Map an alternative index back to its CBOR tag.
pub fn constructor_tag(alternative: u64) -> Result<u64> {
    match alternative {
        a if a < COMPACT_ALTERNATIVES => Ok(COMPACT_TAG_BASE + a),
        a if a <= MAX_ALTERNATIVE => Ok(EXTENDED_TAG_BASE + a - COMPACT_ALTERNATIVES),
        a => Err(Error::UnsupportedConstructorArity(a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_range() {
        assert_eq!(alternative_from_tag(121).unwrap(), 0);
        assert_eq!(alternative_from_tag(127).unwrap(), 6);
    }

    #[test]
    fn test_extended_range() {
        assert_eq!(alternative_from_tag(1280).unwrap(), 7);
        assert_eq!(alternative_from_tag(1400).unwrap(), 127);
    }

    #[test]
    fn test_tag_beyond_extended_range_is_arity_error() {
        assert!(matches!(
            alternative_from_tag(1401),
            Err(Error::UnsupportedConstructorArity(128))
        ));
        assert!(matches!(
            alternative_from_tag(1407),
            Err(Error::UnsupportedConstructorArity(134))
        ));
    }

    #[test]
    fn test_foreign_tags_rejected() {
        for tag in [0, 2, 24, 102, 120, 128, 1279, 1408, 5000] {
            assert!(
                matches!(alternative_from_tag(tag), Err(Error::InvalidConstructorTag(t)) if t == tag),
                "tag {tag} should be rejected"
            );
        }
    }

    #[test]
    fn test_every_alternative_round_trips() {
        for alternative in 0..=MAX_ALTERNATIVE {
            let tag = constructor_tag(alternative).unwrap();
            assert_eq!(alternative_from_tag(tag).unwrap(), alternative);
        }
    }

    #[test]
    fn test_constructor_tag_rejects_128() {
        let err = constructor_tag(128).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConstructorArity(128)));
        assert!(err.to_string().contains("128"));
    }

    #[test]
    fn test_to_json_shapes() {
        let datum = RawDatum::Constructor {
            tag: 0,
            fields: vec![RawDatum::integer(1), RawDatum::bytes("DEADBEEF")],
        };
        assert_eq!(
            datum.to_json(),
            serde_json::json!({"tag": 0, "fields": [1, "deadbeef"]})
        );
    }

    #[test]
    fn test_big_integer_stays_exact() {
        let big: BigInt = "340282366920938463463374607431768211456".parse().unwrap();
        let json = integer_to_json(&big);
        assert_eq!(json.to_string(), "340282366920938463463374607431768211456");
    }
}
