//! Orders API request bodies.

use foxi::{
    ids::{MenuItemId, RestaurantId},
    orders::{OrderDraft, StatusUpdate},
};
use jiff::Timestamp;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct CreateOrderItemRequest<'a> {
    menu_item: MenuItemId,
    quantity: u32,
    special_instructions: &'a str,
}

/// `POST orders/` body
#[derive(Debug, Serialize)]
pub(crate) struct CreateOrderRequest<'a> {
    restaurant: RestaurantId,
    items: Vec<CreateOrderItemRequest<'a>>,
    delivery_address: &'a str,
    delivery_phone: &'a str,
    special_instructions: &'a str,
}

impl<'a> From<&'a OrderDraft> for CreateOrderRequest<'a> {
    fn from(draft: &'a OrderDraft) -> Self {
        Self {
            restaurant: draft.restaurant,
            items: draft
                .items
                .iter()
                .map(|item| CreateOrderItemRequest {
                    menu_item: item.menu_item,
                    quantity: item.quantity,
                    special_instructions: item.special_instructions.as_deref().unwrap_or_default(),
                })
                .collect(),
            delivery_address: &draft.delivery_address,
            delivery_phone: &draft.delivery_phone,
            special_instructions: draft.special_instructions.as_deref().unwrap_or_default(),
        }
    }
}

/// `PATCH orders/{id}/status/` body
#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdateRequest<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_delivery_time: Option<Timestamp>,
}

impl<'a> From<&'a StatusUpdate> for StatusUpdateRequest<'a> {
    fn from(update: &'a StatusUpdate) -> Self {
        Self {
            status: update.status.as_str(),
            estimated_delivery_time: update.estimated_delivery_time,
        }
    }
}

/// `PATCH orders/{id}/cancel/` body
#[derive(Debug, Serialize)]
pub(crate) struct CancelOrderRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<'a> CancelOrderRequest<'a> {
    pub(crate) fn new(reason: Option<&'a str>) -> Self {
        Self { reason }
    }
}
