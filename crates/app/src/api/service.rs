//! Orders API service.

use std::time::Duration;

use async_trait::async_trait;
use foxi::{
    ids::RestaurantId,
    orders::{Order, OrderDraft, OrderId, OrderStatistics, StatusUpdate},
};
use mockall::automock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    api::{
        errors::ApiError,
        models::{OrderFilter, Page, RestaurantOrdersFilter},
        records::{OrderRecord, PageRecord, StatisticsRecord},
        requests::{CancelOrderRequest, CreateOrderRequest, StatusUpdateRequest},
        token::ApiToken,
    },
    config::ApiConfig,
};

/// REST client for the ordering backend.
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    base_url: String,
    token: Option<ApiToken>,
    http: Client,
}

impl HttpOrdersApi {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone().and_then(ApiToken::new),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));

        match &self.token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::from_response(status, &body));
        }

        serde_json::from_slice(&body).map_err(ApiError::Json)
    }

    async fn fetch_order(request: RequestBuilder) -> Result<Order, ApiError> {
        let record: OrderRecord = Self::send(request).await?;

        Ok(Order::try_from(record)?)
    }

    async fn fetch_page(request: RequestBuilder) -> Result<Page<Order>, ApiError> {
        let record: PageRecord<OrderRecord> = Self::send(request).await?;

        Ok(Page::try_from(record)?)
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    #[tracing::instrument(
        name = "orders.api.create_order",
        skip(self, draft),
        fields(restaurant_id = %draft.restaurant, line_count = draft.items.len()),
        err
    )]
    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        let request = self
            .request(Method::POST, "orders/")
            .json(&CreateOrderRequest::from(draft));

        Self::fetch_order(request).await
    }

    #[tracing::instrument(name = "orders.api.list_orders", skip(self), err)]
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Page<Order>, ApiError> {
        let request = self
            .request(Method::GET, "orders/")
            .query(filter.query().as_slice());

        Self::fetch_page(request).await
    }

    #[tracing::instrument(name = "orders.api.get_order", skip(self), fields(order_id = %id), err)]
    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        Self::fetch_order(self.request(Method::GET, &format!("orders/{id}/"))).await
    }

    #[tracing::instrument(
        name = "orders.api.update_status",
        skip(self, update),
        fields(order_id = %id, status = %update.status),
        err
    )]
    async fn update_status(&self, id: OrderId, update: &StatusUpdate) -> Result<Order, ApiError> {
        let request = self
            .request(Method::PATCH, &format!("orders/{id}/status/"))
            .json(&StatusUpdateRequest::from(update));

        Self::fetch_order(request).await
    }

    #[tracing::instrument(
        name = "orders.api.cancel_order",
        skip(self, reason),
        fields(order_id = %id),
        err
    )]
    async fn cancel_order(&self, id: OrderId, reason: Option<String>) -> Result<Order, ApiError> {
        let request = self
            .request(Method::PATCH, &format!("orders/{id}/cancel/"))
            .json(&CancelOrderRequest::new(reason.as_deref()));

        Self::fetch_order(request).await
    }

    #[tracing::instrument(name = "orders.api.my_orders", skip(self), err)]
    async fn my_orders(&self, page: u32) -> Result<Page<Order>, ApiError> {
        let request = self
            .request(Method::GET, "orders/my-orders/")
            .query(&[("page", page)]);

        Self::fetch_page(request).await
    }

    #[tracing::instrument(
        name = "orders.api.restaurant_orders",
        skip(self, filter),
        fields(restaurant_id = %restaurant),
        err
    )]
    async fn restaurant_orders(
        &self,
        restaurant: RestaurantId,
        filter: &RestaurantOrdersFilter,
    ) -> Result<Page<Order>, ApiError> {
        let request = self
            .request(Method::GET, &format!("restaurants/{restaurant}/orders/"))
            .query(filter.query().as_slice());

        Self::fetch_page(request).await
    }

    #[tracing::instrument(
        name = "orders.api.order_statistics",
        skip(self),
        fields(restaurant_id = %restaurant),
        err
    )]
    async fn order_statistics(
        &self,
        restaurant: RestaurantId,
        period: &str,
    ) -> Result<OrderStatistics, ApiError> {
        let request = self
            .request(Method::GET, &format!("restaurants/{restaurant}/order-stats/"))
            .query(&[("period", period)]);

        let record: StatisticsRecord = Self::send(request).await?;

        Ok(OrderStatistics::try_from(record)?)
    }
}

/// Remote operations on orders.
#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Submit a new order.
    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiError>;

    /// List orders visible to the caller.
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Page<Order>, ApiError>;

    /// Retrieve a single order.
    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError>;

    /// Move an order to a new lifecycle stage.
    async fn update_status(&self, id: OrderId, update: &StatusUpdate) -> Result<Order, ApiError>;

    /// Cancel an order, optionally with a reason.
    async fn cancel_order(&self, id: OrderId, reason: Option<String>) -> Result<Order, ApiError>;

    /// List the caller's own orders.
    async fn my_orders(&self, page: u32) -> Result<Page<Order>, ApiError>;

    /// List orders placed with a restaurant.
    async fn restaurant_orders(
        &self,
        restaurant: RestaurantId,
        filter: &RestaurantOrdersFilter,
    ) -> Result<Page<Order>, ApiError>;

    /// Aggregated figures for a restaurant over a period such as `"30d"`.
    async fn order_statistics(
        &self,
        restaurant: RestaurantId,
        period: &str,
    ) -> Result<OrderStatistics, ApiError>;
}
