//! Order registry.
//!
//! Append-only, monotonically-indexed table of orders plus a
//! message-keyed index. Creation is unconditional: no signature validity
//! gate at write time — recording an intent and authorizing an intent are
//! two separate steps, and verification is an explicitly invoked query.

use std::collections::HashMap;

use custodia_types::{Address, Order, OrderId, Signature};

/// Append-only order table with message-keyed lookup.
///
/// Duplicate messages across distinct orders are allowed; the message
/// index is last-write-wins, so [`OrderRegistry::get`] returns the most
/// recently inserted order for a message. [`OrderRegistry::get_by_id`] is
/// the unambiguous accessor.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    /// Orders by id — the id IS the index, ids are dense and zero-based.
    orders: Vec<Order>,
    /// message → most recently inserted order with that message.
    by_message: HashMap<Vec<u8>, OrderId>,
}

impl OrderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new order. The id is the current order count.
    pub fn create(&mut self, buyer: Address, message: Vec<u8>, signature: Signature) -> OrderId {
        let order_id = OrderId(self.total());
        self.by_message.insert(message.clone(), order_id);
        self.orders
            .push(Order::new(order_id, message, signature, buyer));
        order_id
    }

    /// Look up the most recently inserted order carrying `message`.
    #[must_use]
    pub fn get(&self, message: &[u8]) -> Option<&Order> {
        let id = self.by_message.get(message)?;
        self.get_by_id(*id)
    }

    #[must_use]
    pub fn get_by_id(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(usize::try_from(order_id.0).ok()?)
    }

    /// Mutable access for the settlement path only.
    pub(crate) fn get_by_id_mut(&mut self, order_id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(usize::try_from(order_id.0).ok()?)
    }

    /// Count of created orders; doubles as the next id to be assigned.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.orders.len() as u64
    }
}
