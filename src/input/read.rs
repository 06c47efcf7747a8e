//! Reading datum bytes.

use crate::cli::InputSpec;
use crate::error::{Error, Result};
use crate::input::detect::sniff_content;
use std::fs;
use std::io::{self, IsTerminal, Read};
use tracing::debug;

/// Read datum bytes from the specified source.
///
/// Files and stdin may hold binary CBOR or its hex text.
pub fn read_input(spec: &InputSpec) -> Result<Vec<u8>> {
    let bytes = match spec {
        InputSpec::Hex(text) => hex::decode(text)?,

        InputSpec::File(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound(path.clone()));
            }
            let buffer = fs::read(path).map_err(|e| Error::IoError {
                path: Some(path.clone()),
                source: e,
            })?;
            sniff_content(buffer)?
        }

        InputSpec::Stdin => {
            // Nothing piped in
            if io::stdin().is_terminal() {
                return Err(Error::NoInput);
            }
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|e| Error::IoError {
                    path: None,
                    source: e,
                })?;
            sniff_content(buffer)?
        }
    };

    debug!(bytes = bytes.len(), "read datum");
    Ok(bytes)
}
