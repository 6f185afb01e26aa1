//! Signing helpers for tests. **Never use in production.**
//!
//! Gated behind the `test-helpers` feature so downstream crates can mint
//! real keys and signatures in their own test suites.

use k256::ecdsa::SigningKey;

use custodia_types::{Address, Signature};

use crate::digest::{eth_signed_digest, hash_message};
use crate::verifier::address_from_key;

/// Deterministic signing key from a one-byte seed.
///
/// # Panics
/// Panics on `seed == 0` (the zero scalar is not a valid key).
#[must_use]
pub fn test_key(seed: u8) -> SigningKey {
    assert_ne!(seed, 0, "seed 0 yields the invalid zero scalar");
    SigningKey::from_bytes(&[seed; 32].into()).expect("nonzero repeated byte is a valid scalar")
}

/// The address belonging to a signing key.
#[must_use]
pub fn address_of(key: &SigningKey) -> Address {
    address_from_key(key.verifying_key())
}

/// Sign a precomputed content hash under the canonical convention
/// (EIP-191 prefix applied before signing).
#[must_use]
pub fn sign_digest(key: &SigningKey, content_hash: &[u8; 32]) -> Signature {
    let digest = eth_signed_digest(content_hash);
    let (sig, recid) = key
        .sign_prehash_recoverable(&digest)
        .expect("signing cannot fail on a valid key");
    let mut bytes = [0u8; 65];
    bytes[..64].copy_from_slice(&sig.to_bytes());
    bytes[64] = recid.to_byte() + 27;
    Signature(bytes)
}

/// Sign raw message bytes: content hash, then prefix, then sign.
#[must_use]
pub fn sign_message(key: &SigningKey, message: &[u8]) -> Signature {
    sign_digest(key, &hash_message(message))
}
