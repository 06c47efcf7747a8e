//! Terminal tables for the blueprint store.

use crate::blueprint::{Blueprint, ListItems, Schema, SchemaType};
use crate::store::BlueprintSummary;
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table, presets};

/// Table of stored blueprints.
pub fn format_summaries(summaries: &[BlueprintSummary]) -> String {
    if summaries.is_empty() {
        return format!("{}\n", "No blueprints stored".dimmed());
    }

    let mut table = new_table(&["ID", "Title", "Description"]);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(summary.id),
            Cell::new(&summary.title),
            Cell::new(truncate(&summary.description, 60)),
        ]);
    }

    format!("{}\n", table)
}

/// Preamble header followed by a table of the definitions.
pub fn format_blueprint(id: u64, blueprint: &Blueprint) -> String {
    let preamble = &blueprint.preamble;
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        format!("#{}", id).dimmed(),
        preamble.title.bold().cyan()
    ));
    output.push_str(&format!("  {}\n", preamble.description));
    if let Some(version) = &preamble.version {
        output.push_str(&format!("  {} {}\n", "Version:".dimmed(), version));
    }
    if let Some(plutus) = &preamble.plutus_version {
        output.push_str(&format!("  {} {}\n", "Plutus:".dimmed(), plutus));
    }
    if !blueprint.validators.is_empty() {
        let titles: Vec<_> = blueprint.validators.iter().map(|v| v.title.as_str()).collect();
        output.push_str(&format!("  {} {}\n", "Validators:".dimmed(), titles.join(", ")));
    }
    output.push('\n');

    let mut table = new_table(&["Definition", "Kind", "Detail"]);
    for (name, schema) in &blueprint.definitions {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(schema.kind_name()),
            Cell::new(detail(schema)),
        ]);
    }
    output.push_str(&format!("{}\n", table));

    output
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(comfy_table::Color::DarkGrey))
            .collect::<Vec<_>>(),
    );
    table
}

/// One-line description of what a definition holds.
fn detail(schema: &Schema) -> String {
    match &schema.kind {
        SchemaType::List(ListItems::Tuple(items)) => field_titles(items),
        SchemaType::Constructor { index, fields } => {
            format!("#{} ({})", index, field_titles(fields))
        }
        SchemaType::Ref(target) => target.clone(),
        SchemaType::AnyOf(branches) => format!("{} alternatives", branches.len()),
        _ => String::new(),
    }
}

fn field_titles(fields: &[Schema]) -> String {
    fields
        .iter()
        .map(|f| f.title.as_deref().unwrap_or("_"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
