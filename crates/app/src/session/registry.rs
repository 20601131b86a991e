//! Order Registry
//!
//! Client-side cache of the orders the session knows about. Every write is
//! tagged with the [`Sequence`] issued when its request was sent, so a slow
//! response can never overwrite one that was issued later and already applied.
//! Cached copies are only kept while an older request is still unsettled.

use std::collections::BTreeSet;

use foxi::orders::{Order, OrderId, OrderStatistics};
use rustc_hash::FxHashMap;

/// Issue order of a registry-writing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sequence(u64);

impl Sequence {
    /// Raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Versioned {
    sequence: Sequence,
    order: Order,
}

/// Orders known to the session.
#[derive(Debug, Default)]
pub struct OrderRegistry {
    issued: u64,
    orders: Vec<Order>,
    orders_seq: Sequence,
    my_orders: Vec<Order>,
    my_orders_seq: Sequence,
    current: Option<Order>,
    current_seq: Sequence,
    statistics: Option<OrderStatistics>,
    statistics_seq: Sequence,
    pending: BTreeSet<Sequence>,
    latest: FxHashMap<OrderId, Versioned>,
}

impl OrderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a request that is about to be sent.
    ///
    /// The request stays pending until [`settle`](Self::settle) is called.
    pub fn issue(&mut self) -> Sequence {
        self.issued += 1;

        let sequence = Sequence(self.issued);

        self.pending.insert(sequence);

        sequence
    }

    /// Mark a request as finished, whether or not its response was applied.
    ///
    /// Cached copies newer than every pending request can no longer guard
    /// against a stale write, so they are released.
    pub fn settle(&mut self, sequence: Sequence) {
        self.pending.remove(&sequence);

        match self.pending.first().copied() {
            Some(oldest) => self.latest.retain(|_, cached| cached.sequence > oldest),
            None => self.latest.clear(),
        }
    }

    /// All orders, as last listed.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The caller's own orders, as last listed.
    pub fn my_orders(&self) -> &[Order] {
        &self.my_orders
    }

    /// The order currently being viewed.
    pub fn current(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    /// Latest statistics snapshot.
    pub fn statistics(&self) -> Option<&OrderStatistics> {
        self.statistics.as_ref()
    }

    /// Replace the global list. Returns `false` when the response is stale.
    pub fn replace_orders(&mut self, orders: Vec<Order>, sequence: Sequence) -> bool {
        if sequence <= self.orders_seq {
            return false;
        }

        self.orders = self.reconcile(orders, sequence);
        self.orders_seq = sequence;

        true
    }

    /// Replace the caller's own list. Returns `false` when the response is stale.
    pub fn replace_my_orders(&mut self, orders: Vec<Order>, sequence: Sequence) -> bool {
        if sequence <= self.my_orders_seq {
            return false;
        }

        self.my_orders = self.reconcile(orders, sequence);
        self.my_orders_seq = sequence;

        true
    }

    /// Make `order` the current order. Returns `false` when the response is stale.
    ///
    /// When a newer copy of the same order is already cached, that copy is used.
    pub fn set_current(&mut self, order: Order, sequence: Sequence) -> bool {
        if sequence <= self.current_seq {
            return false;
        }

        self.current = Some(self.admit(order, sequence));
        self.current_seq = sequence;

        true
    }

    /// Record a freshly created order at the head of both lists and as current.
    pub fn insert_created(&mut self, order: Order, sequence: Sequence) {
        let id = order.id;

        self.record(&order, sequence);

        self.orders.retain(|existing| existing.id != id);
        self.orders.insert(0, order.clone());
        self.my_orders.retain(|existing| existing.id != id);
        self.my_orders.insert(0, order.clone());
        self.current = Some(order);

        self.orders_seq = self.orders_seq.max(sequence);
        self.my_orders_seq = self.my_orders_seq.max(sequence);
        self.current_seq = self.current_seq.max(sequence);
    }

    /// Splice a server-returned order into every collection holding its id.
    ///
    /// Returns `false` without touching anything when a newer copy of the
    /// order has already been applied.
    pub fn apply_update(&mut self, order: Order, sequence: Sequence) -> bool {
        if self.is_stale(order.id, sequence) {
            return false;
        }

        self.record(&order, sequence);

        for slot in self
            .orders
            .iter_mut()
            .chain(self.my_orders.iter_mut())
            .chain(self.current.iter_mut())
            .filter(|existing| existing.id == order.id)
        {
            slot.clone_from(&order);
        }

        true
    }

    /// Store a statistics snapshot. Returns `false` when the response is stale.
    pub fn set_statistics(&mut self, statistics: OrderStatistics, sequence: Sequence) -> bool {
        if sequence <= self.statistics_seq {
            return false;
        }

        self.statistics = Some(statistics);
        self.statistics_seq = sequence;

        true
    }

    fn is_stale(&self, id: OrderId, sequence: Sequence) -> bool {
        self.latest
            .get(&id)
            .is_some_and(|cached| cached.sequence > sequence)
    }

    fn record(&mut self, order: &Order, sequence: Sequence) {
        self.latest.insert(
            order.id,
            Versioned {
                sequence,
                order: order.clone(),
            },
        );
    }

    fn admit(&mut self, order: Order, sequence: Sequence) -> Order {
        match self.latest.get(&order.id) {
            Some(cached) if cached.sequence > sequence => cached.order.clone(),
            _ => {
                self.record(&order, sequence);
                order
            }
        }
    }

    fn reconcile(&mut self, orders: Vec<Order>, sequence: Sequence) -> Vec<Order> {
        orders
            .into_iter()
            .map(|order| self.admit(order, sequence))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use foxi::orders::OrderStatus;
    use rust_decimal::Decimal;

    use crate::test::helpers::make_order;

    use super::*;

    fn statuses(orders: &[Order]) -> Vec<(u64, OrderStatus)> {
        orders
            .iter()
            .map(|order| (order.id.get(), order.status.clone()))
            .collect()
    }

    #[test]
    fn update_reaches_every_collection_holding_the_order() {
        let mut registry = OrderRegistry::new();

        let list = registry.issue();
        registry.replace_orders(vec![make_order(1), make_order(2)], list);

        let mine = registry.issue();
        registry.replace_my_orders(vec![make_order(2), make_order(3)], mine);

        let current = registry.issue();
        registry.set_current(make_order(2), current);

        let mut updated = make_order(2);
        updated.status = OrderStatus::Ready;

        let update = registry.issue();

        assert!(registry.apply_update(updated, update), "update should apply");
        assert_eq!(
            statuses(registry.orders()),
            [(1, OrderStatus::Pending), (2, OrderStatus::Ready)]
        );
        assert_eq!(
            statuses(registry.my_orders()),
            [(2, OrderStatus::Ready), (3, OrderStatus::Pending)]
        );
        assert_eq!(
            registry.current().map(|order| order.status.clone()),
            Some(OrderStatus::Ready)
        );
    }

    #[test]
    fn update_for_unknown_order_touches_nothing() {
        let mut registry = OrderRegistry::new();

        let list = registry.issue();
        registry.replace_orders(vec![make_order(1)], list);

        let update = registry.issue();
        registry.apply_update(make_order(9), update);

        assert_eq!(statuses(registry.orders()), [(1, OrderStatus::Pending)]);
        assert!(registry.current().is_none(), "current should stay empty");
    }

    #[test]
    fn older_list_response_is_discarded() {
        let mut registry = OrderRegistry::new();

        let first = registry.issue();
        let second = registry.issue();

        assert!(registry.replace_orders(vec![make_order(2)], second));
        assert!(!registry.replace_orders(vec![make_order(1)], first));
        assert_eq!(statuses(registry.orders()), [(2, OrderStatus::Pending)]);
    }

    #[test]
    fn older_update_never_overwrites_newer_one() {
        let mut registry = OrderRegistry::new();

        let list = registry.issue();
        registry.replace_orders(vec![make_order(1)], list);

        let slow = registry.issue();
        let fast = registry.issue();

        let mut delivered = make_order(1);
        delivered.status = OrderStatus::Delivered;

        let mut preparing = make_order(1);
        preparing.status = OrderStatus::Preparing;

        assert!(registry.apply_update(delivered, fast));
        assert!(!registry.apply_update(preparing, slow));
        assert_eq!(statuses(registry.orders()), [(1, OrderStatus::Delivered)]);
    }

    #[test]
    fn list_replacement_keeps_fresher_cached_copy() {
        let mut registry = OrderRegistry::new();

        let list = registry.issue();
        let update = registry.issue();

        let mut cancelled = make_order(4);
        cancelled.status = OrderStatus::Cancelled;

        registry.apply_update(cancelled, update);

        assert!(registry.replace_orders(vec![make_order(4), make_order(5)], list));
        assert_eq!(
            statuses(registry.orders()),
            [(4, OrderStatus::Cancelled), (5, OrderStatus::Pending)]
        );
    }

    #[test]
    fn settled_requests_release_cached_copies() {
        let mut registry = OrderRegistry::new();

        for round in 0..50_u64 {
            let list = registry.issue();

            registry.replace_orders((round * 3..round * 3 + 3).map(make_order).collect(), list);
            registry.settle(list);
        }

        assert!(registry.latest.is_empty(), "nothing pending, nothing cached");
        assert_eq!(registry.orders().len(), 3);
    }

    #[test]
    fn pending_request_keeps_newer_copy_cached() {
        let mut registry = OrderRegistry::new();

        let list = registry.issue();
        registry.replace_orders(vec![make_order(1)], list);
        registry.settle(list);

        let slow = registry.issue();
        let fast = registry.issue();

        let mut delivered = make_order(1);
        delivered.status = OrderStatus::Delivered;

        let mut preparing = make_order(1);
        preparing.status = OrderStatus::Preparing;

        assert!(registry.apply_update(delivered, fast));
        registry.settle(fast);

        assert_eq!(registry.latest.len(), 1);
        assert!(!registry.apply_update(preparing, slow));

        registry.settle(slow);

        assert!(registry.latest.is_empty(), "nothing pending, nothing cached");
        assert_eq!(statuses(registry.orders()), [(1, OrderStatus::Delivered)]);
    }

    #[test]
    fn older_current_and_statistics_are_discarded() {
        let mut registry = OrderRegistry::new();

        let first = registry.issue();
        let second = registry.issue();

        assert!(registry.set_current(make_order(2), second));
        assert!(!registry.set_current(make_order(1), first));
        assert_eq!(registry.current().map(|order| order.id.get()), Some(2));

        let older = registry.issue();
        let newer = registry.issue();

        let statistics = |total_orders| OrderStatistics {
            total_orders,
            total_revenue: Decimal::ZERO,
            average_order_value: Decimal::ZERO,
            orders_by_status: FxHashMap::default(),
            revenue_by_day: Vec::new(),
        };

        assert!(registry.set_statistics(statistics(8), newer));
        assert!(!registry.set_statistics(statistics(5), older));
        assert_eq!(
            registry.statistics().map(|statistics| statistics.total_orders),
            Some(8)
        );
    }

    #[test]
    fn current_order_takes_fresher_cached_copy() {
        let mut registry = OrderRegistry::new();

        let fetch = registry.issue();
        let update = registry.issue();

        let mut ready = make_order(6);
        ready.status = OrderStatus::Ready;

        registry.apply_update(ready, update);

        assert!(registry.set_current(make_order(6), fetch));
        assert_eq!(
            registry.current().map(|order| order.status.clone()),
            Some(OrderStatus::Ready)
        );
    }

    #[test]
    fn created_order_goes_to_head_and_blocks_older_lists() {
        let mut registry = OrderRegistry::new();

        let initial = registry.issue();
        registry.replace_my_orders(vec![make_order(1)], initial);

        let in_flight = registry.issue();
        let created = registry.issue();

        registry.insert_created(make_order(7), created);

        assert!(!registry.replace_my_orders(vec![make_order(1)], in_flight));
        assert_eq!(
            statuses(registry.my_orders()),
            [(7, OrderStatus::Pending), (1, OrderStatus::Pending)]
        );
        assert_eq!(statuses(registry.orders()), [(7, OrderStatus::Pending)]);
        assert_eq!(registry.current().map(|order| order.id.get()), Some(7));
    }
}
