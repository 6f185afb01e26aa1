//! # custodia-identity
//!
//! **Identity Verifier**: given a signature, a message, and a claimed
//! address, recover the actual signer and confirm equality.
//!
//! The crate owns no persistent state. It fixes the digest convention used
//! by *every* signed message in the system:
//!
//! 1. `hash_message(m)` — Keccak-256 of the raw message bytes (the
//!    "content hash").
//! 2. `eth_signed_digest(h)` — Keccak-256 of
//!    `"\x19Ethereum Signed Message:\n32" ‖ h`, the domain-separated
//!    prehash actually signed.
//!
//! The prefix makes raw message bytes and pre-hashed digests
//! non-interchangeable: a signature over one convention never verifies
//! against the other.
//!
//! Recovery uses secp256k1 ECDSA with a 65-byte `r ‖ s ‖ v` signature,
//! `v ∈ {27, 28}`. The recovered address is the rightmost 20 bytes of the
//! Keccak-256 hash of the uncompressed public key.

pub mod digest;
pub mod verifier;

#[cfg(any(test, feature = "test-helpers"))]
pub mod signer;

pub use digest::{eth_signed_digest, hash_message, keccak256};
pub use verifier::{
    address_from_key, is_valid_signature, is_valid_signature_digest, recover_signer, verify_signer,
};
