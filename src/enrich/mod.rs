//! Schema-guided enrichment of raw datums.

mod enricher;
mod value;

pub use enricher::enrich;
pub use value::{Enriched, EnrichedData, EnrichedValue, TypeName};
