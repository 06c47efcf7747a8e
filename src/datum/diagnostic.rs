//! CBOR diagnostic notation (RFC 8949 §8) for decoded values.

use crate::datum::decode::decode_cbor;
use crate::error::Result;
use ciborium::Value;
use std::fmt::Write;

/// Indentation step used by the multi-line layout.
const INDENT: &str = "  ";

/// Decode CBOR bytes and render them in diagnostic notation.
pub fn bytes_to_diagnostic(bytes: &[u8], pretty: bool) -> Result<String> {
    let value = decode_cbor(bytes)?;
    Ok(diagnose(&value, pretty))
}

/// Render a value in diagnostic notation.
///
/// With `pretty`, non-empty arrays and maps put one element per line.
pub fn diagnose(value: &Value, pretty: bool) -> String {
    let mut out = String::new();
    write_value(&mut out, value, pretty, 0);
    out
}

fn write_value(out: &mut String, value: &Value, pretty: bool, depth: usize) {
    match value {
        Value::Integer(n) => {
            let _ = write!(out, "{}", i128::from(*n));
        }
        Value::Bytes(bytes) => {
            let _ = write!(out, "h'{}'", hex::encode(bytes));
        }
        Value::Text(text) => write_text(out, text),
        Value::Float(f) => write_float(out, *f),
        Value::Bool(b) => {
            let _ = write!(out, "{}", b);
        }
        Value::Null => out.push_str("null"),
        Value::Tag(tag, inner) => {
            let _ = write!(out, "{}(", tag);
            write_value(out, inner, pretty, depth);
            out.push(')');
        }
        Value::Array(items) => {
            write_seq(out, "[", "]", items.iter(), pretty, depth, |out, item, depth| {
                write_value(out, item, pretty, depth)
            });
        }
        Value::Map(entries) => {
            write_seq(out, "{", "}", entries.iter(), pretty, depth, |out, (k, v), depth| {
                write_value(out, k, pretty, depth);
                out.push_str(": ");
                write_value(out, v, pretty, depth);
            });
        }
        _ => out.push_str("undefined"),
    }
}

fn write_seq<'a, T: 'a>(
    out: &mut String,
    open: &str,
    close: &str,
    items: impl ExactSizeIterator<Item = &'a T>,
    pretty: bool,
    depth: usize,
    mut write_item: impl FnMut(&mut String, &'a T, usize),
) {
    out.push_str(open);
    let len = items.len();
    if len == 0 {
        out.push_str(close);
        return;
    }

    for (i, item) in items.enumerate() {
        if pretty {
            out.push('\n');
            out.push_str(&INDENT.repeat(depth + 1));
        } else if i > 0 {
            out.push(' ');
        }
        write_item(out, item, depth + 1);
        if i + 1 < len {
            out.push(',');
        }
    }

    if pretty {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
    }
    out.push_str(close);
}

/// JSON string syntax, as RFC 8949 §8 prescribes for text strings.
fn write_text(out: &mut String, text: &str) {
    match serde_json::to_string(text) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => {
            let _ = write!(out, "{:?}", text);
        }
    }
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
    } else if f.fract() == 0.0 {
        let _ = write!(out, "{:.1}", f);
    } else {
        let _ = write!(out, "{}", f);
    }
}
