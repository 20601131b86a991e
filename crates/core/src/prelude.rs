//! Foxi prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, DisplayDetails},
    ids::{CustomerId, MenuItemId, RestaurantId, TypedId},
    money::koruna,
    orders::{
        DailyRevenue, DeliveryInfo, DraftError, DraftLine, Order, OrderDraft, OrderId, OrderLine,
        OrderStatistics, OrderStatus, StatusUpdate, display_name,
    },
};
