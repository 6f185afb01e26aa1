//! Settlement controller.
//!
//! One [`EscrowEngine`] per deployment: seller identity, advertised
//! commitment, and asset kind are fixed at construction. The engine is an
//! explicit state struct, not process-global state, so independent
//! instances can coexist in one process.
//!
//! State machine per order: `Pending --approve_order(by seller)--> Closed`.
//! `Closed` is terminal; there is no cancel, expiry, or re-open.

use rust_decimal::Decimal;
use tracing::{info, warn};

use custodia_identity::{hash_message, is_valid_signature, is_valid_signature_digest};
use custodia_types::{
    Action, ActionLabel, Address, AssetKind, EscrowError, Order, OrderId, Result,
    SellerCommitment, Signature,
};

use crate::ledger::AssetLedger;
use crate::registry::OrderRegistry;

/// Single-seller, multi-buyer escrow engine.
pub struct EscrowEngine {
    /// The engine's own custody account. Funding lands here; settlement
    /// and withdrawal pay out of here.
    address: Address,
    commitment: SellerCommitment,
    asset: AssetKind,
    registry: OrderRegistry,
    /// Append-only lifecycle event log for in-process observers.
    events: Vec<Action>,
}

impl EscrowEngine {
    /// Deploy an engine instance. Custody is funded separately, either via
    /// [`EscrowEngine::with_funding`] or an external transfer into
    /// [`EscrowEngine::address`].
    #[must_use]
    pub fn new(address: Address, commitment: SellerCommitment, asset: AssetKind) -> Self {
        Self {
            address,
            commitment,
            asset,
            registry: OrderRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Deploy with construction-time funding of the custody account.
    #[must_use]
    pub fn with_funding<L: AssetLedger + ?Sized>(
        ledger: &mut L,
        initial: Decimal,
        address: Address,
        commitment: SellerCommitment,
        asset: AssetKind,
    ) -> Self {
        ledger.deposit(address, initial);
        Self::new(address, commitment, asset)
    }

    // -----------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn seller(&self) -> Address {
        self.commitment.seller
    }

    /// The advertised seller signature.
    #[must_use]
    pub fn seller_sign(&self) -> &Signature {
        &self.commitment.signature
    }

    /// The advertised seller commitment message.
    #[must_use]
    pub fn seller_message(&self) -> &[u8] {
        &self.commitment.message
    }

    #[must_use]
    pub fn asset(&self) -> AssetKind {
        self.asset
    }

    /// Count of created orders; doubles as the next order id.
    #[must_use]
    pub fn total_orders(&self) -> u64 {
        self.registry.total()
    }

    /// Most recently inserted order carrying `message` (the message index
    /// is last-write-wins for duplicates; use [`EscrowEngine::get_order_by_id`]
    /// to disambiguate).
    #[must_use]
    pub fn get_order(&self, message: &[u8]) -> Option<&Order> {
        self.registry.get(message)
    }

    #[must_use]
    pub fn get_order_by_id(&self, order_id: OrderId) -> Option<&Order> {
        self.registry.get_by_id(order_id)
    }

    /// The lifecycle event log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Action] {
        &self.events
    }

    // -----------------------------------------------------------------
    // Signature queries
    // -----------------------------------------------------------------

    /// `true` iff `sig` was produced by the stored seller over
    /// `content_hash`. Takes a precomputed content hash — the digest-side
    /// entry point of the verification convention.
    #[must_use]
    pub fn is_valid_seller_signature(&self, sig: &Signature, content_hash: &[u8; 32]) -> bool {
        is_valid_signature_digest(sig, content_hash, self.commitment.seller)
    }

    /// `true` iff `sig` is a valid signature over `message`'s canonical
    /// digest by `claimed`. Pure; gates nothing by itself.
    #[must_use]
    pub fn is_valid_signature(&self, sig: &Signature, message: &[u8], claimed: Address) -> bool {
        is_valid_signature(sig, message, claimed)
    }

    /// On-demand check of the stored seller commitment.
    #[must_use]
    pub fn verify_commitment(&self) -> bool {
        self.is_valid_seller_signature(
            &self.commitment.signature,
            &hash_message(&self.commitment.message),
        )
    }

    // -----------------------------------------------------------------
    // Order lifecycle
    // -----------------------------------------------------------------

    /// Register a purchase intent. Unconditional: the caller becomes the
    /// buyer and the signature is stored unverified — the seller is
    /// expected to check legitimacy via the signature queries before
    /// approving.
    pub fn create_order(
        &mut self,
        caller: Address,
        message: Vec<u8>,
        signature: Signature,
    ) -> OrderId {
        let order_id = self.registry.create(caller, message.clone(), signature);
        info!(id = %order_id, buyer = %caller, "order created");
        self.events.push(Action::new(
            order_id,
            ActionLabel::OrderCreated,
            signature,
            message,
            caller,
        ));
        order_id
    }

    /// Approve an order: release the full custodied balance to the
    /// order's buyer and close the order. Seller only; one-shot.
    ///
    /// Effects ordering: the order is flagged closed *before* the transfer
    /// primitive runs, so a reentrant transfer primitive observes the
    /// order as closed. If the transfer fails the flag is rolled back
    /// inside the same call — a failed call leaves all state as before.
    ///
    /// # Errors
    /// - `ApproveUnauthorized` if `caller` is not the seller
    /// - `OrderNotFound` / `OrderAlreadyClosed`
    /// - `TokenMismatch` if `ledger` does not match the asset descriptor
    /// - transfer-level errors (insufficient or emptied custody)
    pub fn approve_order<L: AssetLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        order_id: OrderId,
    ) -> Result<()> {
        if caller != self.commitment.seller {
            warn!(id = %order_id, caller = %caller, "approval rejected: not the seller");
            return Err(EscrowError::ApproveUnauthorized { caller });
        }
        self.check_ledger(ledger)?;

        let custody = self.address;
        let order = self
            .registry
            .get_by_id_mut(order_id)
            .ok_or(EscrowError::OrderNotFound(order_id))?;

        order.close()?;
        let buyer = order.buyer_address;
        let signature = order.buyer_signature;
        let message = order.buyer_message.clone();

        let amount = ledger.balance_of(custody);
        if let Err(err) = ledger.transfer(custody, buyer, amount) {
            order.reopen();
            warn!(id = %order_id, %err, "approval rolled back: transfer failed");
            return Err(err);
        }

        info!(id = %order_id, buyer = %buyer, %amount, "order approved and settled");
        self.events.push(Action::new(
            order_id,
            ActionLabel::Approved,
            signature,
            message,
            caller,
        ));
        Ok(())
    }

    /// Withdraw the entire custodied balance to the seller. Seller only.
    ///
    /// Touches no order state: open orders stay open and simply become
    /// unfulfillable until custody is funded again. Returns the amount
    /// moved (zero if custody was already empty).
    ///
    /// # Errors
    /// - `WithdrawUnauthorized` if `caller` is not the seller
    /// - `TokenMismatch` if `ledger` does not match the asset descriptor
    pub fn withdraw_funds<L: AssetLedger + ?Sized>(
        &mut self,
        ledger: &mut L,
        caller: Address,
    ) -> Result<Decimal> {
        if caller != self.commitment.seller {
            warn!(caller = %caller, "withdrawal rejected: not the seller");
            return Err(EscrowError::WithdrawUnauthorized { caller });
        }
        self.check_ledger(ledger)?;

        let amount = ledger.balance_of(self.address);
        if !amount.is_zero() {
            ledger.transfer(self.address, self.commitment.seller, amount)?;
        }

        info!(seller = %self.commitment.seller, %amount, "custody withdrawn");
        self.events.push(Action::new(
            OrderId(self.registry.total()),
            ActionLabel::Withdrawn,
            self.commitment.signature,
            self.commitment.message.clone(),
            caller,
        ));
        Ok(amount)
    }

    /// The asset descriptor and the supplied ledger must agree before any
    /// value moves.
    fn check_ledger<L: AssetLedger + ?Sized>(&self, ledger: &L) -> Result<()> {
        match (self.asset, ledger.token()) {
            (AssetKind::Native, None) => Ok(()),
            (AssetKind::Token(expected), Some(actual)) if expected == actual => Ok(()),
            (AssetKind::Token(expected), Some(actual)) => Err(EscrowError::TokenMismatch {
                ledger: actual,
                expected,
            }),
            (AssetKind::Token(expected), None) => Err(EscrowError::TokenMismatch {
                ledger: Address::ZERO,
                expected,
            }),
            (AssetKind::Native, Some(actual)) => Err(EscrowError::TokenMismatch {
                ledger: actual,
                expected: Address::ZERO,
            }),
        }
    }
}
