//! Asset descriptor.
//!
//! Fixed at engine construction; selects which transfer primitive the
//! settlement path invokes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Address;

/// What the engine holds in custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Native value held by the engine's own account.
    Native,
    /// A fungible-token balance at the given token contract.
    Token(Address),
}

impl AssetKind {
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The token contract address, if this is a token asset.
    #[must_use]
    pub fn token(&self) -> Option<Address> {
        match self {
            Self::Native => None,
            Self::Token(addr) => Some(*addr),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "NATIVE"),
            Self::Token(addr) => write!(f, "TOKEN:{addr}"),
        }
    }
}
