//! Public projection.
//!
//! Strips private key material and replaces raw contact values with hashes:
//!
//! - `email`: unsalted hash of the address, so the server can look it up
//! - `phone_number`: hash salted with a hash of the private signature key,
//!   so only a holder of the private identity can compute it
//!
//! The two schemes must stay distinct.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{Map, Value};
use zeroize::Zeroizing;

use sigil_crypto::{generic_hash, generic_hash_parts, HASH_SIZE, SIGNATURE_PRIVATE_KEY_SIZE};

use crate::error::{IdentityError, IdentityResult};
use crate::identity::{
    fields, read_target, typed, AnyPublicIdentity, ProvisionalIdentity, PublicIdentity,
    PublicProvisionalIdentity,
};
use crate::serde_helpers::base64_secret;
use crate::target::Target;

pub fn hash_email(email: &str) -> [u8; HASH_SIZE] {
    generic_hash(email.as_bytes())
}

pub fn hash_phone_number(
    private_signature_key: &[u8; SIGNATURE_PRIVATE_KEY_SIZE],
    phone_number: &str,
) -> [u8; HASH_SIZE] {
    let salt = generic_hash(private_signature_key);
    generic_hash_parts(&[&salt[..], phone_number.as_bytes()])
}

impl ProvisionalIdentity {
    /// Shareable form with the contact value hashed.
    pub fn to_public(&self) -> PublicProvisionalIdentity {
        let mut public = self.public.clone();
        let hashed = match public.target() {
            Target::Email => Some(hash_email(&public.public.value)),
            Target::PhoneNumber => Some(hash_phone_number(
                &self.private_signature_key,
                &public.public.value,
            )),
            _ => None,
        };
        if let (Some(hash), Some(target)) = (hashed, public.target().hashed()) {
            public.public.target = target;
            public.public.value = STANDARD.encode(hash);
        }
        public
    }
}

/// The only private field phone number hashing reads.
#[derive(Deserialize)]
struct PhoneNumberSalt {
    #[serde(with = "base64_secret")]
    private_signature_key: Zeroizing<[u8; SIGNATURE_PRIVATE_KEY_SIZE]>,
}

/// Project a generically decoded identity of any shape.
pub fn to_public(identity: &Map<String, Value>) -> IdentityResult<AnyPublicIdentity> {
    let target = read_target(identity)?;
    let malformed = IdentityError::MalformedInput;

    match target {
        Target::User => {
            typed::<PublicIdentity, _>(identity, malformed).map(AnyPublicIdentity::Permanent)
        }
        Target::Email => {
            let mut public: PublicProvisionalIdentity = typed(identity, malformed)?;
            public.public.value = STANDARD.encode(hash_email(&public.public.value));
            public.public.target = Target::HashedEmail;
            Ok(AnyPublicIdentity::Provisional(public))
        }
        Target::PhoneNumber => {
            if !identity.contains_key(fields::PRIVATE_SIGNATURE_KEY) {
                return Err(IdentityError::InvalidIdentity(
                    "phone_number projection needs the private signature key".to_string(),
                ));
            }
            let salt: PhoneNumberSalt = typed(identity, IdentityError::InvalidIdentity)?;
            let mut public: PublicProvisionalIdentity = typed(identity, malformed)?;
            public.public.value = STANDARD.encode(hash_phone_number(
                &salt.private_signature_key,
                &public.public.value,
            ));
            public.public.target = Target::HashedPhoneNumber;
            Ok(AnyPublicIdentity::Provisional(public))
        }
        Target::HashedEmail | Target::HashedPhoneNumber => {
            typed::<PublicProvisionalIdentity, _>(identity, malformed)
                .map(AnyPublicIdentity::Provisional)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_map, encode};
    use serde_json::json;

    const PHONE_PROVISIONAL: &str = "eyJ0cnVzdGNoYWluX2lkIjoidHBveHlOemgwaFU5RzJpOWFnTXZIeXlkK3BPNnpHQ2pPOUJmaHJDTGpkND0iLCJ0YXJnZXQiOiJwaG9uZV9udW1iZXIiLCJ2YWx1ZSI6IiszMzYxMTIyMzM0NCIsInB1YmxpY19lbmNyeXB0aW9uX2tleSI6Im42bTlYNUxmMFpuYXo4ZjArc2NoTElCTm0rcGlQaG5zWXZBdlh3MktFQXc9IiwicHJpdmF0ZV9lbmNyeXB0aW9uX2tleSI6InRWVFM5bkh4cjJNZFZ1VFI1Y2x3dzBFWGJ3aXM4SGl4Z1BJTmJRSngxVTQ9IiwicHVibGljX3NpZ25hdHVyZV9rZXkiOiJqcklEaWdTQ25BaTNHbDltSUFTbEFpU2hLQzdkQkxGVVpQOUN4TEdzYkg4PSIsInByaXZhdGVfc2lnbmF0dXJlX2tleSI6IlFIcWNMcjhicjZNM2JQblFtUWczcStxSENycDA1RGJjQnBMUGFUWlkwYTZPc2dPS0JJS2NDTGNhWDJZZ0JLVUNKS0VvTHQwRXNWUmsvMExFc2F4c2Z3PT0ifQ==";

    fn email_identity() -> Map<String, Value> {
        match json!({
            "trustchain_id": "tpoxyNzh0hU9G2i9agMvHyyd+pO6zGCjO9BfhrCLjd4=",
            "target": "email",
            "value": "a@b.com",
            "public_encryption_key": "/2j4dI3r8PlvCN3uW4HhA5wBtMKOcACd38K6N0q+mFU=",
            "public_signature_key": "W7QEQBu9FXcXIpOgq62tPwBiyFAbpT1rAruD0h/NrTA=",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_email_hash_is_unsalted() {
        assert_eq!(
            STANDARD.encode(hash_email("a@b.com")),
            "FWtiJUrr2amlc8FIlhFA6+8wahtx45pUqO2Xq9HfQ00="
        );
    }

    #[test]
    fn test_email_projection() {
        let public = to_public(&email_identity()).unwrap();
        let AnyPublicIdentity::Provisional(public) = public else {
            panic!("expected a provisional identity");
        };
        assert_eq!(public.target(), Target::HashedEmail);
        assert_eq!(
            public.public.value,
            "FWtiJUrr2amlc8FIlhFA6+8wahtx45pUqO2Xq9HfQ00="
        );
    }

    #[test]
    fn test_phone_projection_is_salted() {
        let public = to_public(&decode_map(PHONE_PROVISIONAL).unwrap()).unwrap();
        assert_eq!(public.target(), Target::HashedPhoneNumber);
        let AnyPublicIdentity::Provisional(public) = public else {
            panic!("expected a provisional identity");
        };
        assert_eq!(
            public.public.value,
            "JeaiQAh8x7jcioU2m4ihy+CsHJlyW+4VVSSs5SHFUTw="
        );
        assert_ne!(public.public.value, STANDARD.encode(hash_email("+33611223344")));
    }

    #[test]
    fn test_typed_and_generic_projection_agree() {
        let private: ProvisionalIdentity = crate::codec::decode(PHONE_PROVISIONAL).unwrap();
        let generic = to_public(&decode_map(PHONE_PROVISIONAL).unwrap()).unwrap();
        assert_eq!(AnyPublicIdentity::Provisional(private.to_public()), generic);
    }

    #[test]
    fn test_public_phone_projection_rejected() {
        let mut map = decode_map(PHONE_PROVISIONAL).unwrap();
        map.remove("private_signature_key");
        map.remove("private_encryption_key");
        assert!(matches!(
            to_public(&map),
            Err(IdentityError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn test_phone_projection_needs_only_private_signature_key() {
        let mut map = decode_map(PHONE_PROVISIONAL).unwrap();
        map.remove("private_encryption_key");
        let public = to_public(&map).unwrap();
        assert_eq!(
            public,
            to_public(&decode_map(PHONE_PROVISIONAL).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_hashed_projection_is_idempotent() {
        let once = to_public(&email_identity()).unwrap().encode().unwrap();
        let twice = to_public(&decode_map(&once).unwrap())
            .unwrap()
            .encode()
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_target_rejected() {
        let mut map = email_identity();
        map.insert("target".to_string(), json!("fax_number"));
        assert!(matches!(
            to_public(&map),
            Err(IdentityError::UnsupportedTarget(_))
        ));
    }

    #[test]
    fn test_permanent_projection_strips_private_fields() {
        let map = match json!({
            "trustchain_id": "tpoxyNzh0hU9G2i9agMvHyyd+pO6zGCjO9BfhrCLjd4=",
            "target": "user",
            "value": "RDa0eq4XNuj5tV7hdapjOxhmheTh4QBDNpy4Svy9Xok=",
            "user_secret": "7FSf/n0e76QT3s0DkvetRVVJhXZGEjOxj5EWAFexvjI=",
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let token = to_public(&map).unwrap().encode().unwrap();
        let projected = decode_map(&token).unwrap();
        assert!(!projected.contains_key("user_secret"));
        assert_eq!(encode(&projected).unwrap(), token);
    }
}
