//! Canonical digest scheme.
//!
//! Two-step convention, identical on the seller and buyer paths:
//! content hash first, then the domain-separation prefix.

use sha3::{Digest, Keccak256};

/// The EIP-191 personal-message prefix for a 32-byte payload.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The content hash of a commitment message: `keccak256(message)`.
#[must_use]
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    keccak256(message)
}

/// The domain-separated prehash that is actually signed:
/// `keccak256(PREFIX ‖ content_hash)`.
///
/// The prefix keeps raw messages and precomputed digests from being
/// replayed against each other.
#[must_use]
pub fn eth_signed_digest(content_hash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(content_hash);
    hasher.finalize().into()
}
