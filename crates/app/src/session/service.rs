//! Order session service.

use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use foxi::{
    cart::{Cart, CartError, CartLine},
    ids::{MenuItemId, RestaurantId},
    orders::{DeliveryInfo, Order, OrderDraft, OrderId, OrderStatistics, StatusUpdate},
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    api::{ApiError, OrderFilter, OrdersApi, RestaurantOrdersFilter},
    session::{
        errors::{Operation, OrderError},
        registry::{OrderRegistry, Sequence},
        watcher::{self, OrderWatch},
    },
};

/// Statistics period used when none is given.
pub const DEFAULT_STATISTICS_PERIOD: &str = "30d";

/// Mutable state shared by a session and its watchers.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) cart: Cart,
    pub(crate) registry: OrderRegistry,
    last_error: Option<String>,
    in_flight: u32,
}

pub(crate) fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a request as in flight until dropped.
struct InFlight<'a> {
    state: &'a Mutex<SessionState>,
    sequence: Sequence,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a Mutex<SessionState>) -> (Self, Sequence) {
        let mut guard = lock(state);

        guard.in_flight += 1;

        let sequence = guard.registry.issue();

        (Self { state, sequence }, sequence)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut guard = lock(self.state);

        guard.in_flight = guard.in_flight.saturating_sub(1);
        guard.registry.settle(self.sequence);
    }
}

/// Held for the duration of a checkout.
struct Submission<'a> {
    flag: &'a AtomicBool,
}

impl<'a> Submission<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_previous| Self { flag })
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Per-user ordering session: cart, known orders and the last error.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct OrderSession {
    api: Arc<dyn OrdersApi>,
    state: Arc<Mutex<SessionState>>,
    submitting: Arc<AtomicBool>,
}

impl fmt::Debug for OrderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderSession")
            .field("state", &self.state)
            .field("submitting", &self.submitting)
            .finish_non_exhaustive()
    }
}

impl OrderSession {
    /// Start a session with an empty cart.
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(SessionState::default())),
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock(&self.state)
    }

    /// Add a line, merging with an existing line for the same menu item.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the line is rejected; the cart is unchanged.
    pub fn add_to_cart(&self, line: CartLine) -> Result<(), CartError> {
        self.lock().cart.add(line)
    }

    /// Remove a line if present.
    pub fn remove_from_cart(&self, menu_item: MenuItemId) {
        self.lock().cart.remove(menu_item);
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the new total does not fit; the cart is unchanged.
    pub fn update_item_quantity(
        &self,
        menu_item: MenuItemId,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.lock().cart.update_quantity(menu_item, quantity)
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.lock().cart.clear();
    }

    /// Total number of units in the cart.
    pub fn cart_item_count(&self) -> u64 {
        self.lock().cart.item_count()
    }

    /// Cart total.
    pub fn cart_total(&self) -> Decimal {
        self.lock().cart.total()
    }

    /// Snapshot of the cart.
    pub fn cart(&self) -> Cart {
        self.lock().cart.clone()
    }

    /// Submit the cart as a new order.
    ///
    /// On success the cart is cleared and the order becomes the current
    /// order, first in both order lists. On failure the cart is kept.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::SubmissionInProgress`] while another checkout is
    /// running, [`OrderError::Validation`] before any request is sent, or the
    /// classified API failure.
    #[tracing::instrument(
        name = "orders.session.create_order",
        skip(self, delivery),
        fields(order_id = tracing::field::Empty),
        err
    )]
    pub async fn create_order(&self, delivery: DeliveryInfo) -> Result<Order, OrderError> {
        let Some(_submission) = Submission::acquire(&self.submitting) else {
            return Err(self.fail(OrderError::SubmissionInProgress));
        };

        let draft = OrderDraft::from_cart(&self.lock().cart, &delivery);
        let draft = draft.map_err(|error| self.fail(error.into()))?;

        let order = self
            .call(
                Operation::CreateOrder,
                self.api.create_order(&draft),
                |state, order: Order, sequence| {
                    state.registry.insert_created(order.clone(), sequence);
                    state.cart.clear();
                    order
                },
            )
            .await?;

        tracing::Span::current().record("order_id", tracing::field::display(order.id));

        info!(order_id = %order.id, total = %order.total_amount, "created order");

        Ok(order)
    }

    /// Replace the global order list with the first page of results.
    ///
    /// # Errors
    ///
    /// Returns the classified API failure.
    #[tracing::instrument(name = "orders.session.fetch_orders", skip(self), err)]
    pub async fn fetch_orders(&self, filter: &OrderFilter) -> Result<(), OrderError> {
        self.call(
            Operation::FetchOrders,
            self.api.list_orders(filter),
            |state, page, sequence| {
                if !state.registry.replace_orders(page.results, sequence) {
                    debug!(sequence = sequence.get(), "discarded stale order list");
                }
            },
        )
        .await
    }

    /// Replace the caller's own order list with the first page of results.
    ///
    /// # Errors
    ///
    /// Returns the classified API failure.
    #[tracing::instrument(name = "orders.session.fetch_my_orders", skip(self), err)]
    pub async fn fetch_my_orders(&self) -> Result<(), OrderError> {
        self.call(
            Operation::FetchMyOrders,
            self.api.my_orders(1),
            |state, page, sequence| {
                if !state.registry.replace_my_orders(page.results, sequence) {
                    debug!(sequence = sequence.get(), "discarded stale own order list");
                }
            },
        )
        .await
    }

    /// Load an order and make it the current order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids or the classified API failure.
    #[tracing::instrument(
        name = "orders.session.fetch_order_by_id",
        skip(self),
        fields(order_id = %id),
        err
    )]
    pub async fn fetch_order_by_id(&self, id: OrderId) -> Result<(), OrderError> {
        self.call(
            Operation::FetchOrder,
            self.api.get_order(id),
            |state, order, sequence| {
                if !state.registry.set_current(order, sequence) {
                    debug!(sequence = sequence.get(), "discarded stale current order");
                }
            },
        )
        .await
    }

    /// Replace the global order list with a restaurant's orders.
    ///
    /// # Errors
    ///
    /// Returns the classified API failure.
    #[tracing::instrument(
        name = "orders.session.fetch_restaurant_orders",
        skip(self, filter),
        fields(restaurant_id = %restaurant),
        err
    )]
    pub async fn fetch_restaurant_orders(
        &self,
        restaurant: RestaurantId,
        filter: &RestaurantOrdersFilter,
    ) -> Result<(), OrderError> {
        self.call(
            Operation::FetchOrders,
            self.api.restaurant_orders(restaurant, filter),
            |state, page, sequence| {
                if !state.registry.replace_orders(page.results, sequence) {
                    debug!(sequence = sequence.get(), "discarded stale restaurant orders");
                }
            },
        )
        .await
    }

    /// Load statistics for a restaurant, defaulting to the last 30 days.
    ///
    /// # Errors
    ///
    /// Returns the classified API failure.
    #[tracing::instrument(
        name = "orders.session.fetch_order_statistics",
        skip(self),
        fields(restaurant_id = %restaurant),
        err
    )]
    pub async fn fetch_order_statistics(
        &self,
        restaurant: RestaurantId,
        period: Option<&str>,
    ) -> Result<(), OrderError> {
        let period = period.unwrap_or(DEFAULT_STATISTICS_PERIOD);

        self.call(
            Operation::FetchStatistics,
            self.api.order_statistics(restaurant, period),
            |state, statistics, sequence| {
                if !state.registry.set_statistics(statistics, sequence) {
                    debug!(sequence = sequence.get(), "discarded stale statistics");
                }
            },
        )
        .await
    }

    /// Change an order's status and propagate the server's copy.
    ///
    /// # Errors
    ///
    /// Returns the classified API failure.
    #[tracing::instrument(
        name = "orders.session.update_order_status",
        skip(self, update),
        fields(order_id = %id, status = %update.status),
        err
    )]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        update: StatusUpdate,
    ) -> Result<Order, OrderError> {
        let order = self
            .call(
                Operation::UpdateStatus,
                self.api.update_status(id, &update),
                Self::splice,
            )
            .await?;

        info!(order_id = %order.id, status = %order.status, "updated order status");

        Ok(order)
    }

    /// Cancel an order and propagate the server's copy.
    ///
    /// # Errors
    ///
    /// Returns the classified API failure.
    #[tracing::instrument(
        name = "orders.session.cancel_order",
        skip(self, reason),
        fields(order_id = %id),
        err
    )]
    pub async fn cancel_order(
        &self,
        id: OrderId,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        let order = self
            .call(
                Operation::CancelOrder,
                self.api.cancel_order(id, reason),
                Self::splice,
            )
            .await?;

        info!(order_id = %order.id, "cancelled order");

        Ok(order)
    }

    /// Poll an order in the background, feeding results into the registry.
    ///
    /// The first poll happens immediately. Dropping the handle stops polling.
    pub fn watch_order(&self, id: OrderId, interval: Duration) -> OrderWatch {
        watcher::spawn(
            Arc::clone(&self.api),
            Arc::clone(&self.state),
            id,
            interval,
        )
    }

    /// All orders, as last listed.
    pub fn orders(&self) -> Vec<Order> {
        self.lock().registry.orders().to_vec()
    }

    /// The caller's own orders, as last listed.
    pub fn my_orders(&self) -> Vec<Order> {
        self.lock().registry.my_orders().to_vec()
    }

    /// The order currently being viewed.
    pub fn current_order(&self) -> Option<Order> {
        self.lock().registry.current().cloned()
    }

    /// Latest statistics snapshot.
    pub fn statistics(&self) -> Option<OrderStatistics> {
        self.lock().registry.statistics().cloned()
    }

    /// Whether any request is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    /// Message of the most recent failure.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Forget the most recent failure.
    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }

    fn fail(&self, error: OrderError) -> OrderError {
        self.lock().last_error = Some(error.to_string());

        error
    }

    fn splice(state: &mut SessionState, order: Order, sequence: Sequence) -> Order {
        if !state.registry.apply_update(order.clone(), sequence) {
            debug!(order_id = %order.id, "discarded stale order update");
        }

        order
    }

    async fn call<T, R>(
        &self,
        operation: Operation,
        request: impl Future<Output = Result<T, ApiError>>,
        apply: impl FnOnce(&mut SessionState, T, Sequence) -> R,
    ) -> Result<R, OrderError> {
        let (_in_flight, sequence) = InFlight::start(&self.state);

        match request.await {
            Ok(value) => Ok(apply(&mut *self.lock(), value, sequence)),
            Err(source) => Err(self.fail(OrderError::from_api(source, operation))),
        }
    }
}
