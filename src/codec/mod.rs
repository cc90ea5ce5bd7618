//! Payload codec subsystem.
//!
//! # Data Flow
//! ```text
//! encode:
//!     args (JSON array)
//!     → plain JSON text
//!     → fits the limit?  yes → plain text
//!                        no  → compress.rs (Brotli + base64url)
//!                              → fits the limit? yes → packed text
//!                                                no  → EncodeError::TooLarge
//!
//! decode:
//!     ""            → []
//!     plain JSON    → array
//!     otherwise     → compress.rs unpack → JSON → array
//! ```
//!
//! # Design Decisions
//! - No tag distinguishes the two forms; decode tries plain JSON first.
//!   base64url text is almost never valid JSON, and when it is, the
//!   decoded value is not an array and is reported as such
//! - Lengths are counted in characters, the unit external channels limit
//! - Hard ceiling: oversized payloads fail, they are never truncated

pub mod compress;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::FlareConfig;

/// Errors raised while rendering an identifier.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("arguments could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("arguments must serialize to a JSON array, got {0}")]
    NotAList(&'static str),

    #[error("{route} takes at most {params} arguments, got {given}")]
    TooManyArgs {
        route: String,
        given: usize,
        params: usize,
    },

    #[error("payload too long: {plain} chars plain, {compressed} compressed, limit {limit}")]
    TooLarge {
        plain: usize,
        compressed: usize,
        limit: usize,
    },

    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),

    #[error("no route at {0}")]
    UnknownRoute(String),
}

/// Errors raised while reading a payload back.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is neither JSON ({plain}) nor packed JSON ({packed})")]
    Malformed { plain: String, packed: String },

    #[error("decoded payload is not an array but {0}")]
    NotAList(&'static str),
}

/// Argument list ↔ payload text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    inline_threshold: usize,
    quality: u32,
}

impl Codec {
    pub fn new(inline_threshold: usize, quality: u32) -> Self {
        Self {
            inline_threshold,
            quality,
        }
    }

    pub fn from_config(config: &FlareConfig) -> Self {
        Self::new(config.codec.inline_threshold, config.codec.compression_quality)
    }

    pub fn inline_threshold(&self) -> usize {
        self.inline_threshold
    }

    /// Encode `args` against the inline threshold.
    pub fn encode<A: Serialize + ?Sized>(&self, args: &A) -> Result<String, EncodeError> {
        self.encode_within(args, self.inline_threshold)
    }

    /// Encode `args` so the result is at most `limit` characters.
    pub fn encode_within<A: Serialize + ?Sized>(
        &self,
        args: &A,
        limit: usize,
    ) -> Result<String, EncodeError> {
        let values = Self::to_list(args)?;
        self.encode_list(&values, limit)
    }

    pub(crate) fn encode_list(&self, values: &[Value], limit: usize) -> Result<String, EncodeError> {
        let plain = serde_json::to_string(values)?;
        let plain_len = plain.chars().count();
        if plain_len <= limit {
            return Ok(plain);
        }

        let packed = compress::pack(&plain, self.quality).map_err(EncodeError::Compress)?;
        if packed.len() > limit {
            return Err(EncodeError::TooLarge {
                plain: plain_len,
                compressed: packed.len(),
                limit,
            });
        }
        Ok(packed)
    }

    /// Decode a payload into its argument list.
    pub fn decode(&self, payload: &str) -> Result<Vec<Value>, DecodeError> {
        if payload.is_empty() {
            return Ok(Vec::new());
        }

        let value = match serde_json::from_str::<Value>(payload) {
            Ok(value) => value,
            Err(plain) => {
                let malformed = |packed: String| DecodeError::Malformed {
                    plain: plain.to_string(),
                    packed,
                };
                let text = compress::unpack(payload, self.quality).map_err(|e| malformed(e.to_string()))?;
                serde_json::from_str(&text).map_err(|e| malformed(e.to_string()))?
            }
        };

        match value {
            Value::Array(values) => Ok(values),
            other => Err(DecodeError::NotAList(kind_of(&other))),
        }
    }

    pub(crate) fn to_list<A: Serialize + ?Sized>(args: &A) -> Result<Vec<Value>, EncodeError> {
        match serde_json::to_value(args)? {
            Value::Array(values) => Ok(values),
            // `()` is the natural argument list of a zero-parameter handler.
            Value::Null => Ok(Vec::new()),
            other => Err(EncodeError::NotAList(kind_of(&other))),
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::from_config(&FlareConfig::default())
    }
}

/// Split an identifier into its route ID prefix and payload.
///
/// Works on characters, so a tampered non-ASCII prefix never panics; it
/// simply fails to match any route.
pub fn split_identifier(identifier: &str, id_width: usize) -> (&str, &str) {
    match identifier.char_indices().nth(id_width) {
        Some((at, _)) => identifier.split_at(at),
        None => (identifier, ""),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Deterministic, poorly compressible filler.
    fn noise(len: usize) -> String {
        let alphabet: Vec<char> = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ"
            .chars()
            .collect();
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                alphabet[(state % alphabet.len() as u64) as usize]
            })
            .collect()
    }

    #[test]
    fn test_plain_round_trip() {
        let codec = Codec::default();
        let args = json!([54, "page", {"id": 7}, null, [true, 1.5]]);
        let encoded = codec.encode(&args).unwrap();
        assert_eq!(encoded, r#"[54,"page",{"id":7},null,[true,1.5]]"#);
        assert_eq!(Value::Array(codec.decode(&encoded).unwrap()), args);
    }

    #[test]
    fn test_compression_fallback() {
        let codec = Codec::default();
        let args = json!(["x".repeat(300), "x".repeat(50)]);
        let encoded = codec.encode(&args).unwrap();

        assert!(encoded.len() <= 100);
        assert!(!encoded.starts_with('['));
        assert_eq!(Value::Array(codec.decode(&encoded).unwrap()), args);
    }

    #[test]
    fn test_budget_is_enforced() {
        let codec = Codec::default();
        let err = codec.encode(&(noise(400),)).unwrap_err();
        match err {
            EncodeError::TooLarge { plain, compressed, limit } => {
                assert_eq!(plain, 404);
                assert!(compressed > limit);
                assert_eq!(limit, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_encode_within_tighter_limit() {
        let codec = Codec::default();
        let args = ("y".repeat(60),);
        assert!(codec.encode(&args).unwrap().starts_with('['));
        assert!(!codec.encode_within(&args, 40).unwrap().starts_with('['));
    }

    #[test]
    fn test_decode_edge_cases() {
        let codec = Codec::default();
        assert!(codec.decode("").unwrap().is_empty());
        assert!(codec.decode("[]").unwrap().is_empty());
        assert!(matches!(codec.decode("{\"a\":1}"), Err(DecodeError::NotAList("an object"))));
        assert!(matches!(codec.decode("null"), Err(DecodeError::NotAList("null"))));
        assert!(matches!(codec.decode("[54]garbage"), Err(DecodeError::Malformed { .. })));
        assert!(matches!(codec.decode("%%%"), Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn test_encode_rejects_non_lists() {
        let codec = Codec::default();
        assert!(matches!(codec.encode(&json!({"a": 1})), Err(EncodeError::NotAList("an object"))));
        assert!(matches!(codec.encode("text"), Err(EncodeError::NotAList("a string"))));
    }

    #[test]
    fn test_unit_encodes_as_empty_list() {
        let codec = Codec::default();
        assert_eq!(codec.encode(&()).unwrap(), "[]");
        assert!(codec.decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_packed_payload_with_suffix_is_malformed() {
        let codec = Codec::default();
        let encoded = codec.encode(&("lorem ipsum ".repeat(20),)).unwrap();
        assert!(!encoded.starts_with('['));

        for suffix in ["x", "AAAA"] {
            let tampered = format!("{encoded}{suffix}");
            assert!(matches!(codec.decode(&tampered), Err(DecodeError::Malformed { .. })));
        }
    }

    #[test]
    fn test_split_identifier() {
        assert_eq!(split_identifier("2b4e7k513w[54]", 10), ("2b4e7k513w", "[54]"));
        assert_eq!(split_identifier("2b4e7k513w", 10), ("2b4e7k513w", ""));
        assert_eq!(split_identifier("short", 10), ("short", ""));
        assert_eq!(split_identifier("ééééééééééxy", 10), ("éééééééééé", "xy"));
    }
}
