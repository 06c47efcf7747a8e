//! Merged schema definitions and shallow datum/schema matching.

mod matcher;
mod repository;

pub use matcher::matches;
pub use repository::{SchemaRepository, definition_key};
pub(crate) use repository::tuple_items;
