//! Test Helpers

use foxi::{
    ids::{CustomerId, MenuItemId, RestaurantId},
    orders::{Order, OrderId, OrderLine, OrderStatus},
};
use jiff::Timestamp;
use rust_decimal::Decimal;

/// A pending order from restaurant 3 with a single line.
pub(crate) fn make_order(id: u64) -> Order {
    Order {
        id: OrderId::new(id),
        restaurant: RestaurantId::new(3),
        restaurant_name: Some("U Fleků".to_string()),
        customer: CustomerId::new(8),
        items: vec![OrderLine {
            menu_item: MenuItemId::new(1),
            name: Some("Řízek".to_string()),
            quantity: 2,
            unit_price: Some(Decimal::new(890, 2)),
            price: Decimal::new(1780, 2),
            special_instructions: None,
        }],
        status: OrderStatus::Pending,
        total_amount: Decimal::new(1780, 2),
        delivery_address: "Národní 1, Praha".to_string(),
        delivery_phone: "+420 777 000 111".to_string(),
        special_instructions: None,
        estimated_delivery_time: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
