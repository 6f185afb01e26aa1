//! Lifecycle events.
//!
//! Every observable transition emits an [`Action`] whose shape is stable
//! for external observers and indexers:
//! `(subject_id, label, signature, message, actor)`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, OrderId, Signature};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionLabel {
    /// A buyer registered an order.
    OrderCreated,
    /// The seller approved an order and custody was released to the buyer.
    Approved,
    /// The seller withdrew the full custodied balance.
    Withdrawn,
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderCreated => write!(f, "ORDER CREATED"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Withdrawn => write!(f, "WITHDRAWN"),
        }
    }
}

/// A single lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// The order the event is about. For withdrawals there is no order;
    /// the subject is the order count at the time of withdrawal.
    pub subject_id: OrderId,
    pub label: ActionLabel,
    /// The signature carried by the subject order (the seller's own
    /// commitment signature for withdrawals).
    pub signature: Signature,
    /// The message carried by the subject order.
    pub message: Vec<u8>,
    /// Who caused the transition: the buyer for creation, the seller for
    /// approval and withdrawal.
    pub actor: Address,
    pub at: DateTime<Utc>,
}

impl Action {
    #[must_use]
    pub fn new(
        subject_id: OrderId,
        label: ActionLabel,
        signature: Signature,
        message: Vec<u8>,
        actor: Address,
    ) -> Self {
        Self {
            subject_id,
            label,
            signature,
            message,
            actor,
            at: Utc::now(),
        }
    }
}
