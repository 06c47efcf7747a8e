//! Output rendering for enriched datums.

mod json;
mod listing;
mod yaml;

use crate::enrich::EnrichedValue;
use crate::error::Result;
use clap::ValueEnum;

pub use json::render_json;
pub use listing::{format_blueprint, format_summaries};
pub use yaml::{MAX_ANNOTATED_NODES, render_yaml};

/// Output format of the datum view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// YAML annotated with ratio and text hints.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Render a view result.
///
/// No result renders as an empty string and an error renders as its message.
pub fn render(value: Option<&EnrichedValue>, format: RenderFormat) -> Result<String> {
    match value {
        None => Ok(String::new()),
        Some(EnrichedValue::Error(message)) => Ok(message.clone()),
        Some(EnrichedValue::Enriched(enriched)) => match format {
            RenderFormat::Json => render_json(enriched),
            RenderFormat::Yaml => render_yaml(enriched),
        },
    }
}
