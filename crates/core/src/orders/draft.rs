//! Order Draft

use thiserror::Error;

use crate::{
    cart::Cart,
    ids::{MenuItemId, RestaurantId},
};

/// Checkout precondition failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// No delivery address was given.
    #[error("delivery address is required")]
    MissingAddress,

    /// No delivery phone was given.
    #[error("delivery phone is required")]
    MissingPhone,
}

/// Where and how the order should be delivered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryInfo {
    /// Delivery address
    pub address: String,

    /// Contact phone
    pub phone: String,

    /// Order-level instructions for the restaurant or courier.
    pub special_instructions: Option<String>,
}

impl DeliveryInfo {
    /// Delivery info without instructions.
    pub fn new(address: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            phone: phone.into(),
            special_instructions: None,
        }
    }
}

/// Draft line
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    /// Menu item to order
    pub menu_item: MenuItemId,

    /// Quantity
    pub quantity: u32,

    /// Per-line instructions
    pub special_instructions: Option<String>,
}

/// Order creation request built from a cart at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Restaurant receiving the order
    pub restaurant: RestaurantId,

    /// Lines to order
    pub items: Vec<DraftLine>,

    /// Delivery address
    pub delivery_address: String,

    /// Delivery phone
    pub delivery_phone: String,

    /// Order-level instructions
    pub special_instructions: Option<String>,
}

impl OrderDraft {
    /// Build a draft from the cart contents and delivery details.
    ///
    /// The restaurant is taken from the first cart line.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] if delivery details are blank or the cart is empty.
    pub fn from_cart(cart: &Cart, delivery: &DeliveryInfo) -> Result<Self, DraftError> {
        let address = delivery.address.trim();
        let phone = delivery.phone.trim();

        if address.is_empty() {
            return Err(DraftError::MissingAddress);
        }

        if phone.is_empty() {
            return Err(DraftError::MissingPhone);
        }

        let restaurant = cart.restaurant().ok_or(DraftError::EmptyCart)?;

        let items = cart
            .lines()
            .iter()
            .map(|line| DraftLine {
                menu_item: line.menu_item,
                quantity: line.quantity,
                special_instructions: line.special_instructions.clone(),
            })
            .collect();

        let special_instructions = delivery
            .special_instructions
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(Self {
            restaurant,
            items,
            delivery_address: address.to_string(),
            delivery_phone: phone.to_string(),
            special_instructions,
        })
    }
}
