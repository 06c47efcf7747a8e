//! Annotated YAML output.
//!
//! The plain JSON tree is turned into a small YAML document tree, one
//! annotation pass attaches comments to it, and the tree is written out in
//! block style with two-space indentation.

use crate::enrich::Enriched;
use crate::error::{Error, Result};
use serde_json::Value as JsonValue;
use tracing::debug;

/// Nodes visited by the annotation pass before it gives up.
pub const MAX_ANNOTATED_NODES: usize = 1024;

const INDENT: usize = 2;

/// Format an enriched datum as annotated YAML.
///
/// Mappings holding both `numerator` and `denominator` get a leading comment
/// with their quotient. Strings under a `value` key whose hex decodes to
/// ASCII letters and digits get the decoded text as a trailing comment.
pub fn render_yaml(enriched: &Enriched) -> Result<String> {
    let mut document = Node::from_json(&enriched.to_plain_json());

    let mut visited = 0;
    if !annotate(&mut document, None, &mut visited) {
        debug!(limit = MAX_ANNOTATED_NODES, "annotation stopped at node limit");
    }

    let mut out = String::new();
    document.write_root(&mut out)?;
    Ok(out)
}

#[derive(Debug)]
enum Node {
    Scalar {
        value: JsonValue,
        comment: Option<String>,
    },
    Seq {
        items: Vec<Node>,
        comment: Option<String>,
    },
    Map {
        entries: Vec<(String, Node)>,
        comment: Option<String>,
    },
}

impl Node {
    fn from_json(value: &JsonValue) -> Node {
        match value {
            JsonValue::Array(items) => Node::Seq {
                items: items.iter().map(Node::from_json).collect(),
                comment: None,
            },
            JsonValue::Object(map) => Node::Map {
                entries: map.iter().map(|(k, v)| (k.clone(), Node::from_json(v))).collect(),
                comment: None,
            },
            scalar => Node::Scalar {
                value: scalar.clone(),
                comment: None,
            },
        }
    }

    fn is_block(&self) -> bool {
        match self {
            Node::Scalar { .. } => false,
            Node::Seq { items, .. } => !items.is_empty(),
            Node::Map { entries, .. } => !entries.is_empty(),
        }
    }

    fn write_root(&self, out: &mut String) -> Result<()> {
        if self.is_block() {
            self.write_block(out, 0)
        } else {
            out.push_str(&self.inline()?);
            out.push('\n');
            Ok(())
        }
    }

    /// Inline form of a scalar or empty collection, with its trailing comment.
    fn inline(&self) -> Result<String> {
        match self {
            Node::Scalar { value, comment } => {
                let mut text = scalar_text(value)?;
                if let Some(c) = comment {
                    text.push_str(" #");
                    text.push_str(c);
                }
                Ok(text)
            }
            Node::Seq { .. } => Ok("[]".to_string()),
            Node::Map { .. } => Ok("{}".to_string()),
        }
    }

    /// Write a non-empty collection as block lines at `indent`.
    fn write_block(&self, out: &mut String, indent: usize) -> Result<()> {
        let pad = " ".repeat(indent);
        match self {
            Node::Scalar { .. } => {
                out.push_str(&pad);
                out.push_str(&self.inline()?);
                out.push('\n');
            }
            Node::Seq { items, comment } => {
                write_leading_comment(out, &pad, comment);
                for item in items {
                    if item.is_block() {
                        // Render one level deeper, then hang the first line off "- "
                        let mut child = String::new();
                        item.write_block(&mut child, indent + INDENT)?;
                        out.push_str(&pad);
                        out.push_str("- ");
                        out.push_str(&child[indent + INDENT..]);
                    } else {
                        out.push_str(&pad);
                        out.push_str("- ");
                        out.push_str(&item.inline()?);
                        out.push('\n');
                    }
                }
            }
            Node::Map { entries, comment } => {
                write_leading_comment(out, &pad, comment);
                for (key, value) in entries {
                    out.push_str(&pad);
                    out.push_str(&string_text(key)?);
                    out.push(':');
                    if value.is_block() {
                        out.push('\n');
                        value.write_block(out, indent + INDENT)?;
                    } else {
                        out.push(' ');
                        out.push_str(&value.inline()?);
                        out.push('\n');
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_leading_comment(out: &mut String, pad: &str, comment: &Option<String>) {
    if let Some(c) = comment {
        out.push_str(pad);
        out.push('#');
        out.push_str(c);
        out.push('\n');
    }
}

fn scalar_text(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::Null => Ok("null".to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => string_text(s),
        // Collections never reach here
        other => Ok(other.to_string()),
    }
}

/// YAML text for a string, quoted only when needed.
fn string_text(s: &str) -> Result<String> {
    if s.contains('\n') {
        // Block scalars do not nest inside this layout; double quotes do
        return serde_json::to_string(s).map_err(|e| Error::FormatError(e.to_string()));
    }
    let text = serde_yaml::to_string(s).map_err(|e| Error::FormatError(e.to_string()))?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Attach comments; returns false once the node limit is reached.
fn annotate(node: &mut Node, key: Option<&str>, visited: &mut usize) -> bool {
    if *visited >= MAX_ANNOTATED_NODES {
        return false;
    }
    *visited += 1;

    match node {
        Node::Scalar { value, comment } => {
            if key == Some("value") {
                if let JsonValue::String(hex) = value {
                    *comment = decode_text_hint(hex).map(|text| format!(" {}", text));
                }
            }
            true
        }
        Node::Seq { items, .. } => items.iter_mut().all(|item| annotate(item, None, visited)),
        Node::Map { entries, comment } => {
            *comment = ratio_comment(entries);
            entries
                .iter_mut()
                .all(|(k, v)| annotate(v, Some(k.as_str()), visited))
        }
    }
}

fn ratio_comment(entries: &[(String, Node)]) -> Option<String> {
    let field = |name: &str| entries.iter().find(|(k, _)| k == name).map(|(_, v)| v);
    let numerator = field("numerator")?;
    let denominator = field("denominator")?;
    Some(format!(
        " ≈ {}",
        format_number(as_number(numerator) / as_number(denominator))
    ))
}

/// Numeric reading of a node, NaN when it has none.
fn as_number(node: &Node) -> f64 {
    match node {
        Node::Scalar { value, .. } => match value {
            JsonValue::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            JsonValue::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            JsonValue::Bool(b) => f64::from(u8::from(*b)),
            JsonValue::Null => 0.0,
            _ => f64::NAN,
        },
        _ => f64::NAN,
    }
}

/// Shortest round-trip decimal, with `NaN`/`Infinity` spelled out.
fn format_number(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        let sign = if x > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if x == 0.0 {
        "0".to_string()
    } else {
        x.to_string()
    }
}

/// Decode hex byte pairs to characters when all of them are ASCII letters or digits.
fn decode_text_hint(hex: &str) -> Option<String> {
    let bytes = hex::decode(hex).ok()?;
    if bytes.is_empty() || !bytes.iter().all(|&b| is_alphanumeric(b)) {
        return None;
    }
    Some(bytes.iter().map(|&b| char::from(b)).collect())
}

fn is_alphanumeric(b: u8) -> bool {
    (b'a'..=b'z').contains(&b) || (b'A'..=b'Z').contains(&b) || (b'0'..=b'9').contains(&b)
}
