//! Order model.
//!
//! Orders are append-only: once created they are never deleted, and the
//! only mutation is the one-way `open → closed` transition performed by
//! the settlement path.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, Signature};

/// Dense, zero-based order identifier.
///
/// Assigned as the registry's order count at creation time: strictly
/// increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}", self.0)
    }
}

/// A buyer's registered purchase intent.
///
/// Stored unconditionally at creation — the registry performs no signature
/// validity check at write time. Verification is a separate query that
/// observers run before trusting the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    /// Opaque commitment message supplied by the buyer.
    pub buyer_message: Vec<u8>,
    /// Claimed signature over the message's canonical digest.
    pub buyer_signature: Signature,
    /// The caller that registered the order. Settlement pays this address.
    pub buyer_address: Address,
    /// Terminal once set. Never reverts to `false`.
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[must_use]
    pub fn new(
        order_id: OrderId,
        buyer_message: Vec<u8>,
        buyer_signature: Signature,
        buyer_address: Address,
    ) -> Self {
        Self {
            order_id,
            buyer_message,
            buyer_signature,
            buyer_address,
            is_closed: false,
            created_at: Utc::now(),
        }
    }

    /// Transition to closed. Monotonic: closing a closed order is an error,
    /// which is what blocks double settlement at the data-model level.
    pub fn close(&mut self) -> crate::Result<()> {
        if self.is_closed {
            return Err(crate::EscrowError::OrderAlreadyClosed(self.order_id));
        }
        self.is_closed = true;
        Ok(())
    }

    /// Re-open an order whose settlement transfer failed mid-call.
    ///
    /// Only meaningful inside the settlement path's rollback: the flag is
    /// flipped before the transfer runs, and un-flipped if the transfer
    /// fails, so a failed call leaves no visible state change.
    pub fn reopen(&mut self) {
        self.is_closed = false;
    }
}
