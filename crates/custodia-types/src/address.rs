//! Account addresses.
//!
//! An [`Address`] is the rightmost 20 bytes of the Keccak-256 hash of the
//! uncompressed secp256k1 public key (tag byte stripped) — the convention
//! the recover-and-compare verifier in `custodia-identity` produces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 20-byte account address.
///
/// Identifies the seller, each buyer, the engine's own custody account,
/// and token contracts in [`crate::AssetKind::Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address. Used as the "no token" marker by hosts that
    /// wire native custody.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Short hex form for logs.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
