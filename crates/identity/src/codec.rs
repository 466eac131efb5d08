//! Canonical token encoding.
//!
//! A token is `base64(json)` where the JSON object's keys follow a fixed
//! priority list. Identical logical identities therefore always produce
//! byte-identical tokens, whichever code path built them, and decoding then
//! re-encoding a canonical token reproduces it exactly.
//!
//! # Layout
//!
//! - Outer envelope: standard base64 with padding
//! - Body: compact JSON, HTML-sensitive characters escaped as `\u00XX`
//! - Byte fields: standard base64 strings inside the JSON
//! - Key order: [`CANONICAL_KEY_ORDER`], then unlisted keys in map order
//!
//! The raw JSON byte buffers are wiped on drop. Field values passing through
//! `serde_json::Value` on the way are not.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use std::io;
use zeroize::Zeroizing;

use crate::error::{IdentityError, IdentityResult};
use crate::identity::fields;

/// Priority of token keys, first to last.
pub const CANONICAL_KEY_ORDER: [&str; 11] = [
    fields::TRUSTCHAIN_ID,
    fields::TARGET,
    fields::VALUE,
    fields::DELEGATION_SIGNATURE,
    fields::EPHEMERAL_PUBLIC_SIGNATURE_KEY,
    fields::EPHEMERAL_PRIVATE_SIGNATURE_KEY,
    fields::USER_SECRET,
    fields::PUBLIC_ENCRYPTION_KEY,
    fields::PRIVATE_ENCRYPTION_KEY,
    fields::PUBLIC_SIGNATURE_KEY,
    fields::PRIVATE_SIGNATURE_KEY,
];

fn key_rank(key: &str) -> usize {
    CANONICAL_KEY_ORDER
        .iter()
        .position(|known| *known == key)
        .unwrap_or(CANONICAL_KEY_ORDER.len())
}

/// Map entries in canonical order.
struct CanonicalObject<'a> {
    entries: Vec<(&'a String, &'a Value)>,
}

impl<'a> CanonicalObject<'a> {
    fn new(map: &'a Map<String, Value>) -> Self {
        let mut entries: Vec<_> = map.iter().collect();
        // Stable: unlisted keys keep their relative map order
        entries.sort_by_key(|(key, _)| key_rank(key));
        Self { entries }
    }
}

impl Serialize for CanonicalObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Compact JSON that additionally escapes `<`, `>`, `&`, U+2028 and U+2029,
/// matching tokens produced by other implementations of this format.
struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn to_canonical_json(map: &Map<String, Value>) -> IdentityResult<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::new());
    let mut serializer = serde_json::Serializer::with_formatter(&mut *buf, HtmlSafeFormatter);
    CanonicalObject::new(map)
        .serialize(&mut serializer)
        .map_err(|e| IdentityError::MalformedInput(format!("cannot serialize identity: {}", e)))?;
    Ok(buf)
}

/// Encode an already generic identity.
pub fn encode_map(identity: &Map<String, Value>) -> IdentityResult<String> {
    let json = to_canonical_json(identity)?;
    Ok(STANDARD.encode(&json[..]))
}

/// Encode any record that serializes to a JSON object.
pub fn encode<T: Serialize + ?Sized>(record: &T) -> IdentityResult<String> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => encode_map(&map),
        Ok(other) => Err(IdentityError::MalformedInput(format!(
            "identity must serialize to a JSON object, got {}",
            other
        ))),
        Err(e) => Err(IdentityError::MalformedInput(format!(
            "cannot serialize identity: {}",
            e
        ))),
    }
}

fn decode_json(token: &str) -> IdentityResult<Zeroizing<Vec<u8>>> {
    Ok(Zeroizing::new(STANDARD.decode(token)?))
}

/// Decode a token into the requested shape. Unknown fields are ignored.
pub fn decode<T: DeserializeOwned>(token: &str) -> IdentityResult<T> {
    let json = decode_json(token)?;
    serde_json::from_slice(&json)
        .map_err(|e| IdentityError::MalformedInput(format!("invalid identity JSON: {}", e)))
}

/// Decode a token into a generic JSON object.
pub fn decode_map(token: &str) -> IdentityResult<Map<String, Value>> {
    match decode::<Value>(token)? {
        Value::Object(map) => Ok(map),
        other => Err(IdentityError::MalformedInput(format!(
            "identity must be a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_of(token: &str) -> String {
        String::from_utf8(STANDARD.decode(token).unwrap()).unwrap()
    }

    #[test]
    fn test_listed_keys_sorted_by_priority() {
        let token = encode(&json!({
            "delegation_signature": "",
            "value": "",
            "target": "",
            "private_signature_key": "",
            "trustchain_id": "",
        }))
        .unwrap();

        assert_eq!(
            json_of(&token),
            r#"{"trustchain_id":"","target":"","value":"","delegation_signature":"","private_signature_key":""}"#
        );
    }

    #[test]
    fn test_unlisted_keys_sort_last() {
        let token = encode(&json!({
            "zeta": 1,
            "public_signature_key": "",
            "alpha": 2,
            "trustchain_id": "",
        }))
        .unwrap();

        assert_eq!(
            json_of(&token),
            r#"{"trustchain_id":"","public_signature_key":"","alpha":2,"zeta":1}"#
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let record = json!({ "target": "email", "value": "a@b.com" });
        assert_eq!(encode(&record).unwrap(), encode(&record).unwrap());
    }

    #[test]
    fn test_reencoding_canonical_token_is_identity() {
        let token = encode(&json!({
            "public_encryption_key": "/2j4dI3r8PlvCN3uW4HhA5wBtMKOcACd38K6N0q+mFU=",
            "target": "email",
            "trustchain_id": "tpoxyNzh0hU9G2i9agMvHyyd+pO6zGCjO9BfhrCLjd4=",
            "value": "brendan.eich@tanker.io",
        }))
        .unwrap();

        assert_eq!(encode_map(&decode_map(&token).unwrap()).unwrap(), token);
    }

    #[test]
    fn test_html_sensitive_characters_escaped() {
        let token = encode(&json!({ "value": "<a&b>\u{2028}é" })).unwrap();
        assert_eq!(
            json_of(&token),
            r#"{"value":"\u003ca\u0026b\u003e\u2028é"}"#
        );
        assert_eq!(decode_map(&token).unwrap()["value"], "<a&b>\u{2028}é");
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            encode(&json!(["target"])),
            Err(IdentityError::MalformedInput(_))
        ));

        let token = STANDARD.encode("[1,2]");
        assert!(matches!(
            decode_map(&token),
            Err(IdentityError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_bad_base64_rejected() {
        assert!(matches!(
            decode_map("some identity"),
            Err(IdentityError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_bad_json_rejected() {
        let token = STANDARD.encode("{\"target\":");
        assert!(matches!(
            decode_map(&token),
            Err(IdentityError::MalformedInput(_))
        ));
    }
}
