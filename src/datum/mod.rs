//! Plutus datum decoding: CBOR bytes to the canonical raw datum tree.

mod decode;
mod diagnostic;
mod normalize;
mod raw;

pub use decode::decode_cbor;
pub use diagnostic::{bytes_to_diagnostic, diagnose};
pub use normalize::normalize;
pub use raw::{MAX_ALTERNATIVE, RawDatum, alternative_from_tag, constructor_tag, integer_to_json};
