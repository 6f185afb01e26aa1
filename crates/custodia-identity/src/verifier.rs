//! ECDSA recover-and-compare.
//!
//! Recovery answers "who signed this digest"; whether that signer is the
//! *expected* one is a separate comparison. A well-formed signature that
//! recovers to some other address is therefore not a verifier error —
//! only structurally invalid signatures (bad `r`/`s`/`v`) are.

use k256::ecdsa::{RecoveryId, Signature as RecoverableSig, VerifyingKey};

use custodia_types::{Address, EscrowError, Result, Signature};

use crate::digest::{eth_signed_digest, hash_message, keccak256};

/// Split a 65-byte signature into its `(r ‖ s)` half and recovery id.
///
/// `v` must be 27 or 28, the `ecrecover` convention wallet tooling
/// produces.
fn parse(sig: &Signature) -> Result<(RecoverableSig, RecoveryId)> {
    let v = sig.v();
    if v != 27 && v != 28 {
        return Err(EscrowError::MalformedSignature {
            reason: format!("recovery byte must be 27 or 28, got {v}"),
        });
    }
    let recid = RecoveryId::from_byte(v - 27).ok_or_else(|| EscrowError::MalformedSignature {
        reason: "invalid recovery id".to_string(),
    })?;
    let inner =
        RecoverableSig::from_slice(&sig.as_bytes()[..64]).map_err(|e| {
            EscrowError::MalformedSignature {
                reason: e.to_string(),
            }
        })?;
    Ok((inner, recid))
}

/// Address derivation: rightmost 20 bytes of Keccak-256 of the
/// uncompressed public key, tag byte stripped.
#[must_use]
pub fn address_from_key(key: &VerifyingKey) -> Address {
    let encoded = key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    Address(addr)
}

/// Recover the signer of a signature over `eth_signed_digest(content_hash)`.
///
/// This is the digest-taking entry point; the seller verification path
/// feeds it a precomputed content hash.
pub fn recover_signer(content_hash: &[u8; 32], sig: &Signature) -> Result<Address> {
    let (inner, recid) = parse(sig)?;
    let digest = eth_signed_digest(content_hash);
    let key = VerifyingKey::recover_from_prehash(&digest, &inner, recid).map_err(|e| {
        EscrowError::MalformedSignature {
            reason: e.to_string(),
        }
    })?;
    Ok(address_from_key(&key))
}

/// Recover the signer from the raw message bytes.
///
/// Computes the canonical content hash first, then recovers. This is the
/// buyer-side entry point.
pub fn verify_signer(message: &[u8], sig: &Signature) -> Result<Address> {
    recover_signer(&hash_message(message), sig)
}

/// `true` iff `sig` is a valid signature over `message`'s canonical digest
/// by `claimed`'s key.
///
/// Pure, callable by anyone against any address; malformed signatures
/// yield `false` rather than an error. Does not gate anything by itself —
/// callers decide what to do with the boolean.
#[must_use]
pub fn is_valid_signature(sig: &Signature, message: &[u8], claimed: Address) -> bool {
    verify_signer(message, sig).is_ok_and(|signer| signer == claimed)
}

/// Digest-taking twin of [`is_valid_signature`].
#[must_use]
pub fn is_valid_signature_digest(sig: &Signature, content_hash: &[u8; 32], claimed: Address) -> bool {
    recover_signer(content_hash, sig).is_ok_and(|signer| signer == claimed)
}
