//! # custodia-types
//!
//! Shared types and errors for the **Custodia** escrow engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`OrderId`]
//! - **Signatures**: [`Signature`] (65-byte recoverable secp256k1)
//! - **Order model**: [`Order`]
//! - **Commitment model**: [`SellerCommitment`]
//! - **Asset model**: [`AssetKind`]
//! - **Event model**: [`Action`], [`ActionLabel`]
//! - **Errors**: [`EscrowError`] with `CU_ERR_` prefix codes

pub mod address;
pub mod asset;
pub mod commitment;
pub mod error;
pub mod event;
pub mod order;
pub mod signature;

// Re-export all primary types at crate root for ergonomic imports:
//   use custodia_types::{Address, Order, Signature, ...};

pub use address::*;
pub use asset::*;
pub use commitment::*;
pub use error::*;
pub use event::*;
pub use order::*;
pub use signature::*;
