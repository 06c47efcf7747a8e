//! Conversion of generic CBOR values into raw datums.

use crate::datum::raw::{RawDatum, alternative_from_tag};
use crate::error::Result;
use ciborium::Value;
use num_bigint::{BigInt, Sign};
use tracing::{debug, trace};

/// CBOR tag for a positive bignum over a byte string.
const TAG_POSITIVE_BIGNUM: u64 = 2;
/// CBOR tag for a negative bignum over a byte string.
const TAG_NEGATIVE_BIGNUM: u64 = 3;

/// Normalize a decoded CBOR value into a [`RawDatum`].
///
/// Null elements inside lists and constructor fields are dropped, which can
/// shorten a list relative to its wire encoding. Shapes Plutus data never
/// produces (maps, floats, booleans) normalize to [`RawDatum::Null`].
///
/// Fails when a constructor tag is not a Plutus constructor tag or encodes an
/// alternative index above 127.
pub fn normalize(value: &Value) -> Result<RawDatum> {
    match value {
        Value::Null => Ok(RawDatum::Null),

        Value::Integer(n) => Ok(RawDatum::Integer(BigInt::from(i128::from(*n)))),

        Value::Bytes(bytes) => Ok(RawDatum::ByteString(hex::encode(bytes))),

        Value::Text(text) => Ok(RawDatum::ByteString(hex::encode(text.as_bytes()))),

        Value::Array(items) => Ok(RawDatum::List(normalize_items(items)?)),

        Value::Tag(TAG_POSITIVE_BIGNUM, inner) => Ok(bignum(inner, false)),
        Value::Tag(TAG_NEGATIVE_BIGNUM, inner) => Ok(bignum(inner, true)),

        Value::Tag(tag, inner) => match inner.as_ref() {
            Value::Array(contents) => {
                let alternative = alternative_from_tag(*tag)?;
                Ok(RawDatum::Constructor {
                    tag: alternative,
                    fields: normalize_items(contents)?,
                })
            }
            _ => {
                debug!(tag, "tag over a non-array value, treating as null");
                Ok(RawDatum::Null)
            }
        },

        other => {
            debug!(value = ?other, "unsupported CBOR shape, treating as null");
            Ok(RawDatum::Null)
        }
    }
}

/// Normalize every element, dropping the ones that come out as null.
fn normalize_items(items: &[Value]) -> Result<Vec<RawDatum>> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match normalize(item)? {
            RawDatum::Null => trace!(index, "dropping null element"),
            datum => out.push(datum),
        }
    }
    Ok(out)
}

fn bignum(inner: &Value, negative: bool) -> RawDatum {
    match inner {
        Value::Bytes(bytes) => {
            let magnitude = BigInt::from_bytes_be(Sign::Plus, bytes);
            if negative {
                RawDatum::Integer(-(magnitude + 1u32))
            } else {
                RawDatum::Integer(magnitude)
            }
        }
        _ => {
            debug!("bignum tag over a non-bytes value, treating as null");
            RawDatum::Null
        }
    }
}
