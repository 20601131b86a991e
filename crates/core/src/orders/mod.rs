//! Orders

pub mod draft;
pub mod models;
pub mod status;

pub use draft::{DeliveryInfo, DraftError, DraftLine, OrderDraft};
pub use models::{DailyRevenue, Order, OrderId, OrderLine, OrderStatistics, StatusUpdate};
pub use status::{OrderStatus, display_name};
