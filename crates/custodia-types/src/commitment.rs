//! Seller commitment.
//!
//! Set once at engine construction: the seller's identity, an opaque
//! commitment message, and a signature over that message's canonical
//! digest. The signature is checked on demand, not re-verified on every
//! call.

use serde::{Deserialize, Serialize};

use crate::{Address, Signature};

/// The seller's advertised identity claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerCommitment {
    /// The only address allowed to approve orders or withdraw custody.
    pub seller: Address,
    /// Opaque commitment message. Content semantics are the application's
    /// concern, not the engine's.
    pub message: Vec<u8>,
    /// Signature over the canonical digest of `message`.
    pub signature: Signature,
}

impl SellerCommitment {
    #[must_use]
    pub fn new(seller: Address, message: Vec<u8>, signature: Signature) -> Self {
        Self {
            seller,
            message,
            signature,
        }
    }
}
