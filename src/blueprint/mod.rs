//! Plutus contract blueprints (`plutus.json`) and the schema types they define.

mod document;
mod schema;

pub use document::{Blueprint, Preamble, ValidatorInfo, Violation};
pub use schema::{ListItems, Schema, SchemaType};
