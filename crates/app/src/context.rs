//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    api::{ApiError, HttpOrdersApi, OrdersApi},
    config::ApiConfig,
    session::OrderSession,
};

/// Failures while wiring up the application.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The REST client could not be created.
    #[error("failed to build API client")]
    ApiClient(#[source] ApiError),
}

/// Shared services for a running client.
#[derive(Clone)]
pub struct AppContext {
    /// Orders API
    pub orders: Arc<dyn OrdersApi>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from API settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppInitError> {
        let api = HttpOrdersApi::new(config).map_err(AppInitError::ApiClient)?;

        Ok(Self {
            orders: Arc::new(api),
        })
    }

    /// Start a fresh session with an empty cart.
    #[must_use]
    pub fn session(&self) -> OrderSession {
        OrderSession::new(Arc::clone(&self.orders))
    }
}
