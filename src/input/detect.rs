//! Telling hex text apart from file names and binary CBOR.

use crate::cli::InputSpec;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Even-length run of hex digits.
pub(crate) fn looks_like_hex(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Classify a command-line argument; hex wins unless a file with that exact
/// name exists.
pub(crate) fn detect_argument(arg: &str) -> InputSpec {
    let candidate = strip_hex_prefix(arg);
    if looks_like_hex(candidate) && !Path::new(arg).exists() {
        InputSpec::Hex(candidate.to_string())
    } else {
        InputSpec::File(PathBuf::from(arg))
    }
}

/// Bytes of file or stdin content: hex text is decoded, anything else is
/// taken as binary CBOR.
pub(crate) fn sniff_content(buffer: Vec<u8>) -> Result<Vec<u8>> {
    let Ok(text) = std::str::from_utf8(&buffer) else {
        return Ok(buffer);
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::NoInput);
    }

    let candidate = strip_hex_prefix(trimmed);
    if looks_like_hex(candidate) {
        Ok(hex::decode(candidate)?)
    } else {
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_hex() {
        assert!(looks_like_hex("00"));
        assert!(looks_like_hex("D8799F"));
        assert!(!looks_like_hex("d8799"));
        assert!(!looks_like_hex("datum"));
        assert!(!looks_like_hex(""));
    }

    #[test]
    fn test_argument_hex() {
        assert!(matches!(detect_argument("0Xd87980"), InputSpec::Hex(h) if h == "d87980"));
    }

    #[test]
    fn test_argument_existing_file_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cafe");
        std::fs::write(&path, [0x00]).unwrap();
        let arg = path.to_str().unwrap();
        assert!(matches!(detect_argument(arg), InputSpec::File(_)));
    }

    #[test]
    fn test_content_hex_text() {
        let bytes = sniff_content(b"  0xD87980 \n".to_vec()).unwrap();
        assert_eq!(bytes, vec![0xd8, 0x79, 0x80]);
    }

    #[test]
    fn test_content_binary() {
        let input = vec![0xd8, 0x79, 0x80, 0xff];
        assert_eq!(sniff_content(input.clone()).unwrap(), input);
    }

    #[test]
    fn test_content_ascii_that_is_not_hex() {
        // A lone `a` is valid CBOR text, kept as-is
        assert_eq!(sniff_content(b"a".to_vec()).unwrap(), b"a".to_vec());
    }

    #[test]
    fn test_content_blank() {
        assert!(matches!(sniff_content(b" \n\t".to_vec()), Err(Error::NoInput)));
    }
}
