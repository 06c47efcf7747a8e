//! Datum input: hex arguments, files and stdin.

mod detect;
mod read;

pub(crate) use detect::detect_argument;
pub use read::read_input;
