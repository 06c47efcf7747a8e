//! CLI argument parsing for dv.

use crate::error::{Error, Result};
use crate::input::detect_argument;
use crate::render::RenderFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Store location under the home directory when none is configured.
const DEFAULT_STORE: &str = ".dv/blueprints.json";

/// Plutus datum viewer for Cardano.
///
/// Decodes a CBOR datum and names its fields using contract blueprints.
#[derive(Parser, Debug)]
#[command(
    name = "dv",
    version,
    about = "Plutus datum viewer for Cardano",
    after_help = r#"EXAMPLES:
    dv d8799f182a42abcdff               Show a datum (annotated YAML)
    dv datum.cbor --json                JSON output
    cat datum.hex | dv                  Read from stdin
    dv datum.cbor -b plutus.json        Name fields with a blueprint
    dv datum.cbor --diagnostic          CBOR diagnostic notation
    dv datum.cbor --check               Validate only (exit code)
    dv blueprint add plutus.json        Remember a blueprint
    dv blueprint list                   Show remembered blueprints

ENVIRONMENT:
    DV_STORE     Blueprint store file (default ~/.dv/blueprints.json)
    DV_FORMAT    Default output format (yaml or json)
    DV_LOG       Log filter, e.g. DV_LOG=datum_view=debug"#
)]
pub struct Args {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Datum as a hex string or a file (binary or hex). Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Blueprint file to use for this run, after stored ones (repeatable).
    #[arg(long = "blueprint", short = 'b', value_name = "FILE")]
    pub blueprints: Vec<PathBuf>,

    /// Output format.
    #[arg(long, short = 'f', value_enum, env = "DV_FORMAT", default_value_t = RenderFormat::Yaml)]
    pub format: RenderFormat,

    /// Output as JSON (same as --format json).
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Output CBOR diagnostic notation instead of the enriched view.
    #[arg(long, short = 'd')]
    pub diagnostic: bool,

    /// Validate only (exit code indicates result: 0=valid, 1=invalid).
    #[arg(long, short = 'c')]
    pub check: bool,

    /// Blueprint store file.
    #[arg(long, env = "DV_STORE", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Ignore the blueprint store.
    #[arg(long, global = true)]
    pub no_store: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More logging on stderr (-v debug, -vv trace).
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage stored blueprints.
    #[command(name = "blueprint")]
    Blueprint {
        #[command(subcommand)]
        action: BlueprintCommand,
    },
}

/// Blueprint store operations.
#[derive(Subcommand, Debug)]
pub enum BlueprintCommand {
    /// Validate and store blueprint files.
    ///
    /// Each file is handled on its own: an invalid file is reported and the
    /// rest are still stored.
    Add {
        /// Blueprint files (plutus.json).
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// List stored blueprints.
    List {
        /// Output as JSON.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Show the definitions of a stored blueprint.
    Show {
        /// Blueprint id.
        id: u64,
    },

    /// Delete a stored blueprint.
    Remove {
        /// Blueprint id.
        id: u64,
    },
}

/// Specifies how to obtain input bytes.
#[derive(Debug, Clone)]
pub enum InputSpec {
    /// Read from stdin.
    Stdin,
    /// Read from a file path.
    File(PathBuf),
    /// Parse hex string directly.
    Hex(String),
}

impl Args {
    /// Input specification from the positional argument.
    pub fn input_spec(&self) -> InputSpec {
        match &self.input {
            None => InputSpec::Stdin,
            Some(s) if s == "-" => InputSpec::Stdin,
            Some(s) => InputSpec::detect(s),
        }
    }

    /// Output format after applying `--json`.
    pub fn render_format(&self) -> RenderFormat {
        if self.json {
            RenderFormat::Json
        } else {
            self.format
        }
    }

    /// Store file: `--store`/`DV_STORE`, else under `$HOME`.
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store {
            return Ok(path.clone());
        }
        std::env::var_os("HOME")
            .map(|home| Path::new(&home).join(DEFAULT_STORE))
            .ok_or_else(|| Error::Store("no store location: set --store or DV_STORE".to_string()))
    }
}

impl InputSpec {
    /// Detect input type from a string argument.
    ///
    /// Hex wins unless a file with that exact name exists.
    pub fn detect(s: &str) -> Self {
        detect_argument(s)
    }
}
