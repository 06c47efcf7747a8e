//! dv - Plutus datum viewer for Cardano.
//!
//! Decodes Plutus data from CBOR and, given contract blueprints (CIP-57
//! `plutus.json`), names the fields of the lists it recognizes.
//!
//! # Features
//!
//! - Read datums from file, hex string, or stdin
//! - Normalize constructor tags to alternative indices
//! - Match lists against blueprint tuple schemas and key them by field title
//! - YAML output with ratio and text hints, or plain JSON
//! - A persistent blueprint store with `dv blueprint add/list/show/remove`
//! - CBOR diagnostic notation and validation mode with exit codes

pub mod blueprint;
pub mod cli;
pub mod datum;
pub mod enrich;
pub mod error;
pub mod input;
pub mod render;
pub mod schema;
pub mod store;

pub use cli::Args;
pub use enrich::EnrichedValue;
pub use error::{Error, Result};

use blueprint::Blueprint;
use cli::{BlueprintCommand, Command};
use colored::Colorize;
use datum::{bytes_to_diagnostic, decode_cbor, normalize};
use enrich::{Enriched, enrich};
use input::read_input;
use render::{format_blueprint, format_summaries, render};
use schema::SchemaRepository;
use store::{BlueprintStore, FileStore, MemoryStore};
use tracing::{debug, info, warn};

/// Decode a datum and enrich it against the repository.
///
/// Malformed CBOR is an error; a datum that decodes but cannot be
/// normalized comes back as [`EnrichedValue::Error`].
pub fn view(bytes: &[u8], repo: &SchemaRepository) -> Result<EnrichedValue> {
    let value = decode_cbor(bytes)?;
    match view_value(&value, repo) {
        Ok(enriched) => Ok(enriched.into()),
        Err(e) => {
            debug!(error = %e, "datum could not be normalized");
            Ok(EnrichedValue::Error(e.to_string()))
        }
    }
}

fn view_value(value: &ciborium::Value, repo: &SchemaRepository) -> Result<Enriched> {
    let datum = normalize(value)?;
    Ok(enrich(&datum, repo))
}

/// Run dv with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    if let Some(Command::Blueprint { action }) = &args.command {
        return run_blueprint(args, action);
    }

    let bytes = read_input(&args.input_spec())?;

    if args.diagnostic {
        println!("{}", bytes_to_diagnostic(&bytes, true)?);
        return Ok(());
    }

    if args.check {
        // Decodes and normalizes; schemas never reject a datum
        let value = decode_cbor(&bytes)?;
        normalize(&value)?;
        return Ok(());
    }

    let repo = build_repository(args)?;
    let result = view(&bytes, &repo)?;
    let output = render(Some(&result), args.render_format())?;

    if let EnrichedValue::Error(_) = result {
        return Err(Error::InvalidDatum(output));
    }

    println!("{}", output.trim_end());
    Ok(())
}

/// Stored blueprints in id order, then `--blueprint` files in argument order.
///
/// Each document is validated on its own: an invalid one is reported and left
/// out, the rest still name fields.
fn build_repository(args: &Args) -> Result<SchemaRepository> {
    let store: Box<dyn BlueprintStore> = if args.no_store {
        Box::new(MemoryStore::new())
    } else {
        match args.store_path() {
            Ok(path) => Box::new(FileStore::open(path)?),
            Err(e) => {
                warn!(error = %e, "skipping blueprint store");
                Box::new(MemoryStore::new())
            }
        }
    };

    let stored = store.blueprints();
    let loaded = args.blueprints.iter().map(|path| Blueprint::load(path));

    let mut blueprints: Vec<Blueprint> = Vec::new();
    let mut rejected = 0;
    for result in stored.into_iter().chain(loaded) {
        match result {
            Ok(blueprint) => blueprints.push(blueprint),
            Err(e) => {
                rejected += 1;
                debug!(error = %e, "blueprint left out of the repository");
                eprintln!("{}: {}", "error".red(), e);
            }
        }
    }

    let repo = SchemaRepository::build(&blueprints);
    debug!(
        blueprints = blueprints.len(),
        rejected,
        definitions = repo.len(),
        list_schemas = repo.list_schemas().len(),
        "built schema repository"
    );
    Ok(repo)
}

fn open_store(args: &Args) -> Result<FileStore> {
    FileStore::open(args.store_path()?)
}

fn run_blueprint(args: &Args, action: &BlueprintCommand) -> Result<()> {
    match action {
        BlueprintCommand::Add { files } => {
            let mut store = open_store(args)?;
            let mut failed = 0;

            for path in files {
                let added = Blueprint::load(path).and_then(|bp| {
                    let id = store.add(&bp)?;
                    Ok((id, bp.preamble.title))
                });
                match added {
                    Ok((id, title)) => {
                        info!(id, path = %path.display(), "stored blueprint");
                        println!("{} #{} {} ({})", "added".green(), id, title, path.display());
                    }
                    Err(e) => {
                        failed += 1;
                        eprintln!("{} {}: {}", "rejected".red(), path.display(), e);
                    }
                }
            }

            if failed > 0 {
                return Err(Error::BlueprintsRejected {
                    failed,
                    total: files.len(),
                });
            }
            Ok(())
        }

        BlueprintCommand::List { json } => {
            let store = open_store(args)?;
            let summaries = store.list();
            if *json {
                let output = serde_json::to_string_pretty(&summaries)
                    .map_err(|e| Error::FormatError(e.to_string()))?;
                println!("{}", output);
            } else {
                print!("{}", format_summaries(&summaries));
            }
            Ok(())
        }

        BlueprintCommand::Show { id } => {
            let store = open_store(args)?;
            let blueprint = store.get(*id)?;
            print!("{}", format_blueprint(*id, &blueprint));
            Ok(())
        }

        BlueprintCommand::Remove { id } => {
            let mut store = open_store(args)?;
            store.remove(*id)?;
            info!(id, "removed blueprint");
            println!("{} #{}", "removed".green(), id);
            Ok(())
        }
    }
}
