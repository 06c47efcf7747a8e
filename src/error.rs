//! Error types for dv.

use crate::blueprint::Violation;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dv.
#[derive(Error, Debug)]
pub enum Error {
    /// No input was provided (no file, no stdin, no hex).
    #[error("No input provided. Use: dv <file>, dv <hex>, or pipe CBOR to stdin")]
    NoInput,

    /// The specified file was not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// An I/O error occurred.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" reading {}", p.display())).unwrap_or_default())]
    IoError {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Invalid hex input.
    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Malformed CBOR, carrying the decoder's own message.
    #[error("Failed to decode CBOR: {0}")]
    DecodeFailed(String),

    /// Constructor alternative index beyond what the tag encoding can carry.
    #[error("Unsupported constructor arity: alternative index {0} exceeds the maximum of 127")]
    UnsupportedConstructorArity(u64),

    /// CBOR tag that is not a Plutus constructor tag.
    #[error("Invalid constructor tag: {0}")]
    InvalidConstructorTag(u64),

    /// The datum decoded but could not be viewed; carries the rendered message.
    #[error("{0}")]
    InvalidDatum(String),

    /// A `$ref` pointed at a definition no loaded blueprint provides.
    #[error("Definition not found: '{0}'")]
    DefinitionNotFound(String),

    /// A blueprint document failed validation.
    #[error("Invalid blueprint {name}: {}", format_violations(violations))]
    InvalidBlueprint {
        name: String,
        violations: Vec<Violation>,
    },

    /// Some files of a `blueprint add` batch were not stored.
    #[error("{failed} of {total} blueprint file(s) rejected")]
    BlueprintsRejected { failed: usize, total: usize },

    /// No stored blueprint has the requested id.
    #[error("Blueprint #{0} not found")]
    BlueprintNotFound(u64),

    /// The blueprint registry could not be read or written.
    #[error("Blueprint store error: {0}")]
    Store(String),

    /// Output formatting error.
    #[error("Format error: {0}")]
    FormatError(String),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Datum could not be decoded or normalized
            Error::DecodeFailed(_)
            | Error::UnsupportedConstructorArity(_)
            | Error::InvalidConstructorTag(_)
            | Error::InvalidDatum(_) => 1,
            // Parse errors
            Error::InvalidHex(_) => 2,
            // I/O errors
            Error::NoInput | Error::FileNotFound(_) | Error::IoError { .. } => 3,
            // Blueprint and schema errors
            Error::DefinitionNotFound(_)
            | Error::InvalidBlueprint { .. }
            | Error::BlueprintsRejected { .. }
            | Error::BlueprintNotFound(_) => 4,
            // Format errors
            Error::FormatError(_) => 5,
            // Registry errors
            Error::Store(_) => 6,
        }
    }
}
