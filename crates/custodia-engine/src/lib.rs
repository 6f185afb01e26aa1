//! # custodia-engine
//!
//! **Order Registry + Settlement Controller** for the Custodia escrow
//! engine.
//!
//! ## Architecture
//!
//! One [`EscrowEngine`] per deployment: one seller, one asset kind, one
//! advertised commitment. The engine owns the append-only order table and
//! the lifecycle event log; the custodied balance lives behind the
//! [`AssetLedger`] boundary and is passed into each settlement call, the
//! way a host environment supplies its transfer primitive.
//!
//! ## Execution model
//!
//! Calls are serialized and non-reentrant: each operation is a single
//! synchronous step that either fully applies or fully reverts. Inside
//! `approve_order` the order is flagged closed *before* the transfer runs
//! and rolled back if the transfer fails, so a hostile transfer primitive
//! calling back into the engine observes the order as already closed.

pub mod engine;
pub mod ledger;
pub mod registry;

pub use engine::EscrowEngine;
pub use ledger::{AssetLedger, NativeLedger, TokenLedger};
pub use registry::OrderRegistry;
