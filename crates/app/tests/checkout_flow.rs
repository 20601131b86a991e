//! Checkout flow tests

use std::sync::Arc;

use foxi::prelude::*;
use foxi_app::{
    api::{MockOrdersApi, Page},
    session::{OrderError, OrderSession},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use testresult::TestResult;

const RESTAURANT: RestaurantId = RestaurantId::new(3);

fn placed(draft: &OrderDraft, id: u64) -> Order {
    Order {
        id: OrderId::new(id),
        restaurant: draft.restaurant,
        restaurant_name: None,
        customer: CustomerId::new(8),
        items: draft
            .items
            .iter()
            .map(|line| OrderLine {
                menu_item: line.menu_item,
                name: None,
                quantity: line.quantity,
                unit_price: None,
                price: Decimal::ZERO,
                special_instructions: line.special_instructions.clone(),
            })
            .collect(),
        status: OrderStatus::Pending,
        total_amount: Decimal::new(2730, 2),
        delivery_address: draft.delivery_address.clone(),
        delivery_phone: draft.delivery_phone.clone(),
        special_instructions: draft.special_instructions.clone(),
        estimated_delivery_time: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[tokio::test]
async fn cart_to_order_round_trip() -> TestResult {
    let mut api = MockOrdersApi::new();

    api.expect_my_orders()
        .times(1)
        .returning(|_| Ok(Page::of(Vec::new())));
    api.expect_create_order()
        .withf(|draft| {
            draft.delivery_address == "Dlouhá 5"
                && draft.special_instructions.is_none()
                && draft
                    .items
                    .iter()
                    .map(|line| (line.menu_item.get(), line.quantity))
                    .eq([(1, 2), (2, 1)])
        })
        .times(1)
        .returning(|draft| Ok(placed(draft, 41)));

    let session = OrderSession::new(Arc::new(api));

    session.fetch_my_orders().await?;

    session.add_to_cart(CartLine::new(
        MenuItemId::new(1),
        RESTAURANT,
        "Řízek",
        Decimal::new(890, 2),
    ))?;
    session.add_to_cart(CartLine::new(
        MenuItemId::new(2),
        RESTAURANT,
        "Kulajda",
        Decimal::new(950, 2),
    ))?;
    session.add_to_cart(CartLine::new(
        MenuItemId::new(1),
        RESTAURANT,
        "Řízek",
        Decimal::new(890, 2),
    ))?;

    assert_eq!(session.cart_total(), Decimal::new(2730, 2));
    assert_eq!(session.cart_item_count(), 3);

    let mut delivery = DeliveryInfo::new("  Dlouhá 5 ", "777000111");
    delivery.special_instructions = Some("   ".to_string());

    let order = session.create_order(delivery).await?;

    assert_eq!(order.id, OrderId::new(41));
    assert!(session.cart().is_empty(), "cart should be cleared");
    assert_eq!(
        session.my_orders().first().map(|order| order.id),
        Some(OrderId::new(41))
    );

    Ok(())
}

#[tokio::test]
async fn cross_restaurant_lines_are_refused() -> TestResult {
    let mut api = MockOrdersApi::new();

    api.expect_create_order().never();

    let session = OrderSession::new(Arc::new(api));

    session.add_to_cart(CartLine::new(
        MenuItemId::new(1),
        RESTAURANT,
        "Řízek",
        Decimal::new(890, 2),
    ))?;

    let result = session.add_to_cart(CartLine::new(
        MenuItemId::new(9),
        RestaurantId::new(4),
        "Pho",
        Decimal::new(1500, 2),
    ));

    assert_eq!(
        result,
        Err(CartError::RestaurantMismatch {
            cart: RESTAURANT,
            item: RestaurantId::new(4),
        })
    );
    assert_eq!(session.cart().len(), 1);

    session.clear_cart();

    let checkout = session
        .create_order(DeliveryInfo::new("Dlouhá 5", "777000111"))
        .await;

    assert!(
        matches!(checkout, Err(OrderError::Validation(DraftError::EmptyCart))),
        "expected EmptyCart, got {checkout:?}"
    );
    assert_eq!(
        session.last_error().as_deref(),
        Some("cart is empty")
    );

    Ok(())
}
