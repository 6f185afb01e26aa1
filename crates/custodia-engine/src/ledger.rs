//! Asset-transfer boundary.
//!
//! The engine never moves value itself — it invokes an [`AssetLedger`],
//! the imported transfer capability of the host environment. Two
//! in-process implementations cover the supported asset kinds: native
//! value and a fungible-token balance.
//!
//! All mutations are atomic: either the full transfer succeeds or the
//! ledger is unchanged.

use std::collections::HashMap;

use rust_decimal::Decimal;

use custodia_types::{Address, EscrowError, Result};

/// The transfer primitive the settlement path invokes.
pub trait AssetLedger {
    /// The token contract this ledger tracks, or `None` for native value.
    /// The engine checks this against its asset descriptor before settling.
    fn token(&self) -> Option<Address>;

    /// Current balance of `holder`.
    fn balance_of(&self, holder: Address) -> Decimal;

    /// Credit `holder` out of thin air — funding from outside the system.
    fn deposit(&mut self, holder: Address, amount: Decimal);

    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// - `ZeroTransfer` on a zero amount — settling an emptied custody
    ///   fails here instead of silently closing an order
    /// - `InsufficientBalance` if `from` holds less than `amount`
    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()>;

    /// Sum of all balances. Deposits are the only way supply grows, so
    /// transfers must conserve this.
    fn total_supply(&self) -> Decimal;
}

/// Per-address balance table shared by both ledger kinds.
#[derive(Debug, Default)]
struct Balances(HashMap<Address, Decimal>);

impl Balances {
    fn balance_of(&self, holder: Address) -> Decimal {
        self.0.get(&holder).copied().unwrap_or_default()
    }

    fn deposit(&mut self, holder: Address, amount: Decimal) {
        *self.0.entry(holder).or_default() += amount;
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()> {
        if amount.is_zero() {
            return Err(EscrowError::ZeroTransfer);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(EscrowError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        *self.0.entry(from).or_default() -= amount;
        *self.0.entry(to).or_default() += amount;
        Ok(())
    }

    fn total_supply(&self) -> Decimal {
        self.0.values().copied().sum()
    }
}

/// Native-value balances.
#[derive(Debug, Default)]
pub struct NativeLedger {
    balances: Balances,
}

impl NativeLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetLedger for NativeLedger {
    fn token(&self) -> Option<Address> {
        None
    }

    fn balance_of(&self, holder: Address) -> Decimal {
        self.balances.balance_of(holder)
    }

    fn deposit(&mut self, holder: Address, amount: Decimal) {
        self.balances.deposit(holder, amount);
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()> {
        self.balances.transfer(from, to, amount)
    }

    fn total_supply(&self) -> Decimal {
        self.balances.total_supply()
    }
}

/// Fungible-token balances at a fixed token contract address.
#[derive(Debug)]
pub struct TokenLedger {
    token: Address,
    balances: Balances,
}

impl TokenLedger {
    #[must_use]
    pub fn new(token: Address) -> Self {
        Self {
            token,
            balances: Balances::default(),
        }
    }
}

impl AssetLedger for TokenLedger {
    fn token(&self) -> Option<Address> {
        Some(self.token)
    }

    fn balance_of(&self, holder: Address) -> Decimal {
        self.balances.balance_of(holder)
    }

    fn deposit(&mut self, holder: Address, amount: Decimal) {
        self.balances.deposit(holder, amount);
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()> {
        self.balances.transfer(from, to, amount)
    }

    fn total_supply(&self) -> Decimal {
        self.balances.total_supply()
    }
}
