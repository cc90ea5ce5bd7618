//! Compressed payload form: Brotli, rendered as unpadded base64url.

use std::io::{self, Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

const BUFFER_SIZE: usize = 4096;
const LG_WINDOW: u32 = 22;

/// Upper bound on inflated payload size. Identifiers are tiny, so anything
/// larger is a crafted input.
pub const MAX_INFLATED_BYTES: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum UnpackError {
    #[error("not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("brotli stream rejected: {0}")]
    Brotli(#[from] io::Error),

    #[error("inflated payload exceeds {} bytes", MAX_INFLATED_BYTES)]
    TooLarge,

    #[error("inflated payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("packed payload carries trailing or altered input")]
    NotCanonical,
}

/// Compress `text` and render it identifier-safe.
pub fn pack(text: &str, quality: u32) -> io::Result<String> {
    let mut compressed = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut compressed, BUFFER_SIZE, quality, LG_WINDOW);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
    }
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Reverse of [`pack`] at the same `quality`.
///
/// The decoder stops at the end-of-stream marker and would accept anything
/// appended after it, so the text is packed again and must reproduce
/// `packed` exactly.
pub fn unpack(packed: &str, quality: u32) -> Result<String, UnpackError> {
    let compressed = URL_SAFE_NO_PAD.decode(packed)?;

    let mut inflated = Vec::new();
    brotli::Decompressor::new(compressed.as_slice(), BUFFER_SIZE)
        .take(MAX_INFLATED_BYTES as u64 + 1)
        .read_to_end(&mut inflated)?;
    if inflated.len() > MAX_INFLATED_BYTES {
        return Err(UnpackError::TooLarge);
    }

    let text = String::from_utf8(inflated)?;
    if pack(&text, quality)? != packed {
        return Err(UnpackError::NotCanonical);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let text = format!("[\"{}\"]", "abc".repeat(80));
        let packed = pack(&text, 11).unwrap();
        assert!(packed.len() < text.len());
        assert!(packed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(unpack(&packed, 11).unwrap(), text);
    }

    #[test]
    fn test_unpack_rejects_trailing_input() {
        let text = format!("[\"{}\"]", "lorem ipsum ".repeat(20));
        let packed = pack(&text, 11).unwrap();

        for suffix in ["x", "AAAA", "A"] {
            let tampered = format!("{packed}{suffix}");
            assert!(unpack(&tampered, 11).is_err(), "accepted suffix {suffix:?}");
        }
    }

    #[test]
    fn test_unpack_rejects_garbage() {
        assert!(matches!(unpack("[54]", 11), Err(UnpackError::Base64(_))));
        assert!(matches!(unpack("not base64!", 11), Err(UnpackError::Base64(_))));
    }
}
