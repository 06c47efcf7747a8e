//! Blueprint documents: loading and validation.

use crate::blueprint::schema::{Schema, join};
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// One problem found while validating a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path to the offending member, e.g. `preamble.title`.
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Violation {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Blueprint preamble.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preamble {
    pub title: String,
    pub description: String,
    pub version: Option<String>,
    pub plutus_version: Option<String>,
    /// Free-form compiler info (`{name, version}` in practice).
    pub compiler: Option<JsonValue>,
    pub license: Option<String>,
}

/// Summary of a validator entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorInfo {
    pub title: String,
    pub hash: Option<String>,
}

/// A validated blueprint document.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub preamble: Preamble,
    pub validators: Vec<ValidatorInfo>,
    /// Named schema definitions in document order.
    pub definitions: Vec<(String, Schema)>,
    /// The document as uploaded, kept for storage.
    pub document: JsonValue,
}

impl Blueprint {
    /// Validate a parsed JSON document.
    ///
    /// Every violation in the document is reported, not just the first.
    pub fn from_json(document: JsonValue) -> std::result::Result<Blueprint, Vec<Violation>> {
        let mut violations = Vec::new();

        let Some(root) = document.as_object() else {
            return Err(vec![Violation::new("$", "blueprint must be a JSON object")]);
        };

        let preamble = parse_preamble(root, &mut violations);
        let validators = parse_validators(root, &mut violations);

        let mut definitions = Vec::new();
        match root.get("definitions") {
            Some(JsonValue::Object(defs)) => {
                for (name, value) in defs {
                    let schema = Schema::parse(value, &join("definitions", name), &mut violations);
                    definitions.push((name.clone(), schema));
                }
            }
            Some(_) => violations.push(Violation::new("definitions", "must be an object")),
            None => violations.push(Violation::new("definitions", "is required")),
        }

        match preamble {
            Some(preamble) if violations.is_empty() => Ok(Blueprint {
                preamble,
                validators,
                definitions,
                document,
            }),
            _ => Err(violations),
        }
    }

    /// Parse and validate blueprint text; `name` labels the document in errors.
    pub fn parse(name: &str, text: &str) -> Result<Blueprint> {
        let document: JsonValue = serde_json::from_str(text).map_err(|e| Error::InvalidBlueprint {
            name: name.to_string(),
            violations: vec![Violation::new("$", format!("invalid JSON: {}", e))],
        })?;

        let blueprint = Blueprint::from_json(document).map_err(|violations| Error::InvalidBlueprint {
            name: name.to_string(),
            violations,
        })?;

        debug!(
            name,
            title = %blueprint.preamble.title,
            definitions = blueprint.definitions.len(),
            "loaded blueprint"
        );
        Ok(blueprint)
    }

    /// Read and validate a blueprint file.
    pub fn load(path: &Path) -> Result<Blueprint> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| Error::IoError {
            path: Some(path.to_path_buf()),
            source: e,
        })?;
        Blueprint::parse(&path.display().to_string(), &text)
    }
}

fn parse_preamble(root: &Map<String, JsonValue>, violations: &mut Vec<Violation>) -> Option<Preamble> {
    let preamble = match root.get("preamble") {
        Some(JsonValue::Object(p)) => p,
        Some(_) => {
            violations.push(Violation::new("preamble", "must be an object"));
            return None;
        }
        None => {
            violations.push(Violation::new("preamble", "is required"));
            return None;
        }
    };

    let title = required_string(preamble, "preamble", "title", violations);
    let description = required_string(preamble, "preamble", "description", violations);
    let version = optional_string(preamble, "preamble", "version", violations);
    let plutus_version = optional_string(preamble, "preamble", "plutusVersion", violations);
    let license = optional_string(preamble, "preamble", "license", violations);

    let compiler = match preamble.get("compiler") {
        None => None,
        Some(c @ (JsonValue::Object(_) | JsonValue::String(_))) => Some(c.clone()),
        Some(_) => {
            violations.push(Violation::new("preamble.compiler", "must be an object or a string"));
            None
        }
    };

    Some(Preamble {
        title: title?,
        description: description?,
        version,
        plutus_version,
        compiler,
        license,
    })
}

fn parse_validators(root: &Map<String, JsonValue>, violations: &mut Vec<Violation>) -> Vec<ValidatorInfo> {
    let items = match root.get("validators") {
        Some(JsonValue::Array(items)) => items,
        Some(_) => {
            violations.push(Violation::new("validators", "must be an array"));
            return Vec::new();
        }
        None => {
            violations.push(Violation::new("validators", "is required"));
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let path = join("validators", &i.to_string());
            let Some(validator) = item.as_object() else {
                violations.push(Violation::new(path, "must be an object"));
                return None;
            };
            let title = required_string(validator, &path, "title", violations)?;
            let hash = optional_string(validator, &path, "hash", violations);
            Some(ValidatorInfo { title, hash })
        })
        .collect()
}

fn required_string(
    object: &Map<String, JsonValue>,
    path: &str,
    key: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match object.get(key) {
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new(join(path, key), "must be a string"));
            None
        }
        None => {
            violations.push(Violation::new(join(path, key), "is required"));
            None
        }
    }
}

fn optional_string(
    object: &Map<String, JsonValue>,
    path: &str,
    key: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match object.get(key) {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new(join(path, key), "must be a string"));
            None
        }
    }
}
