//! Serde helpers for byte fields.
//!
//! Every byte-valued identity field travels as a standard base64 string inside
//! the token JSON. Lengths are fixed per field and checked on decode.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{de, Deserialize, Deserializer, Serializer};
use zeroize::Zeroizing;

fn decode_exact<E: de::Error, const N: usize>(encoded: &str) -> Result<[u8; N], E> {
    let bytes = Zeroizing::new(STANDARD.decode(encoded).map_err(E::custom)?);
    if bytes.len() != N {
        return Err(E::custom(format!(
            "expected {} bytes, got {}",
            N,
            bytes.len()
        )));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// `[u8; N]` as a base64 string.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Record {
///     #[serde(with = "crate::serde_helpers::base64_array")]
///     key: [u8; 32],
/// }
/// ```
pub mod base64_array {
    use super::*;

    pub fn serialize<S, const N: usize>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        decode_exact(&encoded)
    }
}

/// `Zeroizing<[u8; N]>` as a base64 string, for private key material.
pub mod base64_secret {
    use super::*;

    pub fn serialize<S, const N: usize>(
        value: &Zeroizing<[u8; N]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = Zeroizing::new(STANDARD.encode(&value[..]));
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D, const N: usize>(
        deserializer: D,
    ) -> Result<Zeroizing<[u8; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = Zeroizing::new(String::deserialize(deserializer)?);
        decode_exact(&encoded).map(Zeroizing::new)
    }
}
