//! Orders REST API client.

mod errors;
mod models;
mod records;
mod requests;
mod service;
mod token;

pub use errors::ApiError;
pub use models::{OrderFilter, Page, RestaurantOrdersFilter};
pub use records::RecordError;
pub use service::{HttpOrdersApi, MockOrdersApi, OrdersApi};
pub use token::ApiToken;
