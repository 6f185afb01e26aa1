//! Error types for the Custodia escrow engine.
//!
//! All errors use the `CU_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Authorization errors
//! - 3xx: Transfer errors
//! - 4xx: Signature errors
//!
//! Every failure is surfaced synchronously to the caller and aborts the
//! whole operation with no partial state change.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Address, OrderId};

/// Central error enum for all Custodia operations.
#[derive(Debug, Error)]
pub enum EscrowError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The referenced order does not exist in the registry.
    #[error("CU_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Re-approval attempt against a settled order.
    #[error("CU_ERR_101: Order has already been closed: {0}")]
    OrderAlreadyClosed(OrderId),

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// A non-seller caller attempted to approve an order.
    #[error("CU_ERR_200: Can only be approved by the seller")]
    ApproveUnauthorized { caller: Address },

    /// A non-seller caller attempted to withdraw custody.
    #[error("CU_ERR_201: Only seller can withdraw funds")]
    WithdrawUnauthorized { caller: Address },

    // =================================================================
    // Transfer Errors (3xx)
    // =================================================================
    /// The transfer primitive rejected the movement for lack of balance.
    #[error("CU_ERR_300: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// Zero-amount transfers are rejected, so settling an emptied custody
    /// fails at the transfer primitive instead of silently closing an order.
    #[error("CU_ERR_301: Zero-amount transfer rejected")]
    ZeroTransfer,

    /// The host wired a ledger whose token does not match the engine's
    /// asset descriptor.
    #[error("CU_ERR_302: Ledger token {ledger} does not match asset {expected}")]
    TokenMismatch { ledger: Address, expected: Address },

    // =================================================================
    // Signature Errors (4xx)
    // =================================================================
    /// The signature bytes are structurally invalid (bad `r`/`s`/`v`).
    ///
    /// A well-formed signature that recovers to an unexpected address is
    /// NOT this error — mismatch is a comparison, not a verifier failure.
    #[error("CU_ERR_400: Malformed signature: {reason}")]
    MalformedSignature { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, EscrowError>;
