//! Order polling.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use foxi::orders::{Order, OrderId};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::{
    api::OrdersApi,
    session::{
        registry::Sequence,
        service::{SessionState, lock},
    },
};

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to a running order poll.
///
/// Polling stops when the handle is cancelled or dropped.
#[derive(Debug)]
pub struct OrderWatch {
    id: OrderId,
    task: JoinHandle<()>,
    latest: watch::Receiver<Option<Order>>,
}

impl OrderWatch {
    /// Watched order id.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Latest applied copy of the order, if any poll has succeeded.
    pub fn latest(&self) -> Option<Order> {
        self.latest.borrow().clone()
    }

    /// Wait until a copy newer than the last one seen is applied.
    ///
    /// Returns `None` once polling has stopped.
    pub async fn changed(&mut self) -> Option<Order> {
        self.latest.changed().await.ok()?;

        self.latest.borrow_and_update().clone()
    }

    /// Stop polling.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the poll task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for OrderWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Keeps a poll's sequence pending until its response is handled.
struct Ticket<'a> {
    state: &'a Mutex<SessionState>,
    sequence: Sequence,
}

impl<'a> Ticket<'a> {
    fn issue(state: &'a Mutex<SessionState>) -> Self {
        let sequence = lock(state).registry.issue();

        Self { state, sequence }
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        lock(self.state).registry.settle(self.sequence);
    }
}

pub(crate) fn spawn(
    api: Arc<dyn OrdersApi>,
    state: Arc<Mutex<SessionState>>,
    id: OrderId,
    interval: Duration,
) -> OrderWatch {
    let (sender, latest) = watch::channel(None);

    let task = tokio::spawn(poll(api, state, id, interval, sender));

    OrderWatch { id, task, latest }
}

#[tracing::instrument(
    name = "orders.watcher.poll",
    skip(api, state, sender),
    fields(order_id = %id)
)]
async fn poll(
    api: Arc<dyn OrdersApi>,
    state: Arc<Mutex<SessionState>>,
    id: OrderId,
    interval: Duration,
    sender: watch::Sender<Option<Order>>,
) {
    let mut ticker = time::interval(interval);

    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let ticket = Ticket::issue(&state);

        let order = match api.get_order(id).await {
            Ok(order) => order,
            Err(source) => {
                warn!(error = %source, "order poll failed");
                continue;
            }
        };

        let applied = lock(&state)
            .registry
            .apply_update(order.clone(), ticket.sequence);

        drop(ticket);

        if !applied {
            debug!("discarded stale poll result");
            continue;
        }

        if sender.send(Some(order)).is_err() {
            debug!("order watch dropped");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use foxi::orders::OrderStatus;
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockOrdersApi, Page},
        session::OrderSession,
        test::helpers::make_order,
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn polls_until_dropped_and_survives_errors() -> TestResult {
        let mut api = MockOrdersApi::new();
        let mut calls = 0_u32;

        api.expect_my_orders()
            .times(1)
            .returning(|_| Ok(Page::of(vec![make_order(5)])));

        api.expect_get_order().returning(move |id| {
            calls += 1;

            match calls {
                1 => Ok(make_order(id.get())),
                2 => Err(ApiError::UnexpectedResponse {
                    status: 503,
                    body: String::new(),
                }),
                _ => {
                    let mut order = make_order(id.get());
                    order.status = OrderStatus::OutForDelivery;
                    Ok(order)
                }
            }
        });

        let session = OrderSession::new(Arc::new(api));

        session.fetch_my_orders().await?;

        let mut watch = session.watch_order(OrderId::new(5), DEFAULT_POLL_INTERVAL);

        assert_eq!(watch.id(), OrderId::new(5));

        let first = watch.changed().await.ok_or("watch stopped")?;

        assert_eq!(first.status, OrderStatus::Pending);

        let third = watch.changed().await.ok_or("watch stopped")?;

        assert_eq!(third.status, OrderStatus::OutForDelivery);
        assert_eq!(
            session.my_orders().first().map(|order| order.status.clone()),
            Some(OrderStatus::OutForDelivery)
        );

        assert!(!watch.is_finished(), "watch should still be polling");

        watch.cancel();
        tokio::task::yield_now().await;

        assert!(watch.changed().await.is_none(), "cancelled watch should end");

        tokio::task::yield_now().await;

        assert!(watch.is_finished(), "cancelled watch should be finished");

        Ok(())
    }
}
