//! Identity issuance.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;
use zeroize::Zeroizing;

use sigil_crypto::{
    hash_user_id, new_user_secret, sign, verify, EncryptionKeyPair, RandomSource,
    SignatureKeyPair, OBFUSCATED_USER_ID_SIZE, SIGNATURE_PUBLIC_KEY_SIZE,
};

use crate::credential::AppCredential;
use crate::error::{IdentityError, IdentityResult};
use crate::identity::{
    PermanentIdentity, ProvisionalIdentity, PublicIdentity, PublicProvisionalIdentity,
};
use crate::target::Target;

/// Message the app signs to vouch for an ephemeral key.
fn delegation_message(
    ephemeral_public_signature_key: &[u8; SIGNATURE_PUBLIC_KEY_SIZE],
    obfuscated_user_id: &[u8; OBFUSCATED_USER_ID_SIZE],
) -> [u8; SIGNATURE_PUBLIC_KEY_SIZE + OBFUSCATED_USER_ID_SIZE] {
    let mut message = [0u8; SIGNATURE_PUBLIC_KEY_SIZE + OBFUSCATED_USER_ID_SIZE];
    message[..SIGNATURE_PUBLIC_KEY_SIZE].copy_from_slice(ephemeral_public_signature_key);
    message[SIGNATURE_PUBLIC_KEY_SIZE..].copy_from_slice(obfuscated_user_id);
    message
}

/// Issue a permanent identity for `raw_user_id`.
pub fn build_identity<R: RandomSource + ?Sized>(
    credential: &AppCredential,
    raw_user_id: &str,
    rng: &R,
) -> IdentityResult<PermanentIdentity> {
    credential.verify()?;

    let obfuscated_user_id = hash_user_id(credential.app_id(), raw_user_id);
    let ephemeral = SignatureKeyPair::generate(rng)?;
    let delegation_signature = sign(
        credential.app_secret(),
        &delegation_message(&ephemeral.public_key, &obfuscated_user_id),
    )?;
    let user_secret = Zeroizing::new(new_user_secret(&obfuscated_user_id, rng)?);

    debug!("Issued permanent identity");

    Ok(PermanentIdentity {
        public: PublicIdentity {
            trustchain_id: *credential.app_id(),
            target: Target::User,
            value: STANDARD.encode(obfuscated_user_id),
        },
        delegation_signature,
        ephemeral_public_signature_key: ephemeral.public_key,
        ephemeral_private_signature_key: ephemeral.private_key,
        user_secret,
    })
}

/// Issue a provisional identity for an email address or phone number.
pub fn build_provisional_identity<R: RandomSource + ?Sized>(
    credential: &AppCredential,
    target: Target,
    value: &str,
    rng: &R,
) -> IdentityResult<ProvisionalIdentity> {
    if !matches!(target, Target::Email | Target::PhoneNumber) {
        return Err(IdentityError::UnsupportedTarget(format!(
            "cannot issue a provisional identity for target {}",
            target
        )));
    }
    credential.verify()?;

    let signature_keys = SignatureKeyPair::generate(rng)?;
    let encryption_keys = EncryptionKeyPair::generate(rng)?;

    debug!(%target, "Issued provisional identity");

    Ok(ProvisionalIdentity {
        public: PublicProvisionalIdentity {
            public: PublicIdentity {
                trustchain_id: *credential.app_id(),
                target,
                value: value.to_string(),
            },
            public_signature_key: signature_keys.public_key,
            public_encryption_key: encryption_keys.public_key,
        },
        private_signature_key: signature_keys.private_key,
        private_encryption_key: encryption_keys.private_key,
    })
}

/// Check the delegation signature of a permanent identity against the
/// application's signature verification key.
///
/// False when the value is not a base64 obfuscated user id.
pub fn verify_delegation(
    app_signature_public_key: &[u8; SIGNATURE_PUBLIC_KEY_SIZE],
    identity: &PermanentIdentity,
) -> bool {
    let Ok(decoded) = STANDARD.decode(&identity.public.value) else {
        return false;
    };
    let Ok(obfuscated_user_id) = <[u8; OBFUSCATED_USER_ID_SIZE]>::try_from(decoded.as_slice())
    else {
        return false;
    };

    verify(
        app_signature_public_key,
        &delegation_message(&identity.ephemeral_public_signature_key, &obfuscated_user_id),
        &identity.delegation_signature,
    )
}
