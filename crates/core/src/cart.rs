//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ids::{MenuItemId, RestaurantId};

/// Errors raised by cart mutations. A failed mutation leaves the cart unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line was added with a quantity of zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The line belongs to a different restaurant than the rest of the cart.
    #[error("cart holds items from restaurant {cart}, cannot add an item from restaurant {item}")]
    RestaurantMismatch {
        /// Restaurant the cart is currently bound to.
        cart: RestaurantId,

        /// Restaurant of the rejected line.
        item: RestaurantId,
    },

    /// Merging the quantities would overflow.
    #[error("quantity for menu item {0} is too large")]
    QuantityOverflow(MenuItemId),

    /// A line was added with a price below zero.
    #[error("price for menu item {0} is negative")]
    NegativePrice(MenuItemId),

    /// The cart total would not fit in a decimal.
    #[error("cart total is too large after changing menu item {0}")]
    TotalOverflow(MenuItemId),
}

/// Presentation data captured when a line first enters the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayDetails {
    /// Menu item name
    pub name: String,

    /// Optional image URL
    pub image: Option<String>,

    /// Unit price as shown on the menu
    pub unit_price: Decimal,
}

/// One menu item and its quantity within a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Menu item identity; unique within a cart.
    pub menu_item: MenuItemId,

    /// Restaurant offering the menu item.
    pub restaurant: RestaurantId,

    /// Quantity, at least 1 while the line is in a cart.
    pub quantity: u32,

    /// Unit price at the time the line was added.
    pub unit_price: Decimal,

    /// Per-line kitchen instructions.
    pub special_instructions: Option<String>,

    /// Display details
    pub details: DisplayDetails,
}

impl CartLine {
    /// Create a line with a quantity of 1.
    pub fn new(
        menu_item: MenuItemId,
        restaurant: RestaurantId,
        name: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            menu_item,
            restaurant,
            quantity: 1,
            unit_price,
            special_instructions: None,
            details: DisplayDetails {
                name: name.into(),
                image: None,
                unit_price,
            },
        }
    }

    /// Set the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.details.image = Some(image.into());
        self
    }

    /// Set the per-line instructions.
    #[must_use]
    pub fn with_special_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }

    /// Unit price times quantity, or `None` when the product overflows.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Client-local cart.
///
/// Lines keep insertion order and are unique by menu item. The total is
/// recomputed inside every mutation, so reads never observe a stale value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Decimal,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, merging quantities with an existing line for the same menu item.
    ///
    /// When a line for the menu item already exists only its quantity changes;
    /// the price and details of the incoming line are discarded.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`] if the line's quantity is zero.
    /// - [`CartError::NegativePrice`] if the line's unit price is below zero.
    /// - [`CartError::RestaurantMismatch`] if the cart already holds lines from another restaurant.
    /// - [`CartError::QuantityOverflow`] if the merged quantity does not fit.
    /// - [`CartError::TotalOverflow`] if the new total does not fit.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if line.unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(line.menu_item));
        }

        if let Some(cart) = self.restaurant()
            && cart != line.restaurant
        {
            return Err(CartError::RestaurantMismatch {
                cart,
                item: line.restaurant,
            });
        }

        let menu_item = line.menu_item;

        let Some(existing) = self.line(menu_item) else {
            let total = self
                .total_with(menu_item, line.subtotal())
                .ok_or(CartError::TotalOverflow(menu_item))?;

            self.lines.push(line);
            self.total = total;

            return Ok(());
        };

        let quantity = existing
            .quantity
            .checked_add(line.quantity)
            .ok_or(CartError::QuantityOverflow(menu_item))?;

        self.set_quantity(menu_item, quantity)
    }

    /// Remove the line for a menu item. Absent ids are ignored.
    pub fn remove(&mut self, menu_item: MenuItemId) {
        self.lines.retain(|line| line.menu_item != menu_item);

        // Prices are non-negative, so the remaining lines sum to at most the old total.
        self.total = self
            .total_with(menu_item, Some(Decimal::ZERO))
            .unwrap_or_default();
    }

    /// Overwrite the quantity of a line; zero removes it. Absent ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] if the new total does not fit.
    pub fn update_quantity(
        &mut self,
        menu_item: MenuItemId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove(menu_item);
            return Ok(());
        }

        if self.line(menu_item).is_none() {
            return Ok(());
        }

        self.set_quantity(menu_item, quantity)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Decimal::ZERO;
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for a menu item.
    pub fn line(&self, menu_item: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.menu_item == menu_item)
    }

    /// Restaurant of the first line, if any.
    pub fn restaurant(&self) -> Option<RestaurantId> {
        self.lines.first().map(|line| line.restaurant)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, menu_item: MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.menu_item == menu_item)
    }

    /// Set the quantity of an existing line once the new total is known to fit.
    fn set_quantity(&mut self, menu_item: MenuItemId, quantity: u32) -> Result<(), CartError> {
        let subtotal = self
            .line(menu_item)
            .and_then(|line| line.unit_price.checked_mul(Decimal::from(quantity)));

        let total = self
            .total_with(menu_item, subtotal)
            .ok_or(CartError::TotalOverflow(menu_item))?;

        if let Some(line) = self.line_mut(menu_item) {
            line.quantity = quantity;
        }

        self.total = total;

        Ok(())
    }

    /// Total with the subtotal of `menu_item` replaced by `subtotal`, or with
    /// `subtotal` appended when the item is not in the cart yet.
    fn total_with(&self, menu_item: MenuItemId, subtotal: Option<Decimal>) -> Option<Decimal> {
        self.lines
            .iter()
            .filter(|line| line.menu_item != menu_item)
            .map(CartLine::subtotal)
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line?))?
            .checked_add(subtotal?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const RESTAURANT: RestaurantId = RestaurantId::new(1);

    fn line(id: u64, price: Decimal) -> CartLine {
        CartLine::new(MenuItemId::new(id), RESTAURANT, format!("Item {id}"), price)
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.restaurant(), None);
    }

    #[test]
    fn add_appends_in_insertion_order() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(3, Decimal::ONE))?;
        cart.add(line(1, Decimal::ONE))?;
        cart.add(line(2, Decimal::ONE))?;

        let ids: Vec<u64> = cart.lines().iter().map(|l| l.menu_item.get()).collect();

        assert_eq!(ids, [3, 1, 2]);

        Ok(())
    }

    #[test]
    fn add_merges_quantity_and_keeps_first_snapshot() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::new(890, 2)).with_quantity(2))?;
        cart.add(
            CartLine::new(MenuItemId::new(1), RESTAURANT, "Renamed", Decimal::new(1000, 2))
                .with_quantity(3),
        )?;

        let merged = cart.line(MenuItemId::new(1)).ok_or("line missing")?;

        assert_eq!(cart.len(), 1);
        assert_eq!(merged.quantity, 5);
        assert_eq!(merged.unit_price, Decimal::new(890, 2));
        assert_eq!(merged.details.name, "Item 1");
        assert_eq!(cart.total(), Decimal::new(4450, 2));

        Ok(())
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let mut cart = Cart::new();

        let result = cart.add(line(1, Decimal::ONE).with_quantity(0));

        assert_eq!(result, Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_rejects_other_restaurant() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::ONE))?;

        let other = CartLine::new(
            MenuItemId::new(2),
            RestaurantId::new(9),
            "Elsewhere",
            Decimal::ONE,
        );

        assert_eq!(
            cart.add(other.clone()),
            Err(CartError::RestaurantMismatch {
                cart: RESTAURANT,
                item: RestaurantId::new(9),
            })
        );
        assert_eq!(cart.len(), 1);

        cart.clear();
        cart.add(other)?;

        assert_eq!(cart.restaurant(), Some(RestaurantId::new(9)));

        Ok(())
    }

    #[test]
    fn add_overflow_leaves_cart_unchanged() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::ONE).with_quantity(u32::MAX))?;

        let before = cart.clone();

        assert_eq!(
            cart.add(line(1, Decimal::ONE)),
            Err(CartError::QuantityOverflow(MenuItemId::new(1)))
        );
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn add_rejects_total_that_does_not_fit() -> TestResult {
        let mut cart = Cart::new();

        assert_eq!(
            cart.add(line(1, Decimal::MAX).with_quantity(2)),
            Err(CartError::TotalOverflow(MenuItemId::new(1)))
        );
        assert!(cart.is_empty(), "rejected line should not be kept");
        assert_eq!(cart.total(), Decimal::ZERO);

        cart.add(line(1, Decimal::MAX))?;

        let before = cart.clone();

        assert_eq!(
            cart.add(line(2, Decimal::ONE)),
            Err(CartError::TotalOverflow(MenuItemId::new(2)))
        );
        assert_eq!(
            cart.add(line(1, Decimal::MAX)),
            Err(CartError::TotalOverflow(MenuItemId::new(1)))
        );
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn add_rejects_negative_price() {
        let mut cart = Cart::new();

        assert_eq!(
            cart.add(line(1, Decimal::NEGATIVE_ONE)),
            Err(CartError::NegativePrice(MenuItemId::new(1)))
        );
        assert!(cart.is_empty(), "rejected line should not be kept");
    }

    #[test]
    fn update_quantity_overflow_leaves_cart_unchanged() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::MAX))?;
        cart.add(line(2, Decimal::ZERO))?;

        let before = cart.clone();

        assert_eq!(
            cart.update_quantity(MenuItemId::new(1), 3),
            Err(CartError::TotalOverflow(MenuItemId::new(1)))
        );
        assert_eq!(cart, before);

        cart.remove(MenuItemId::new(1));

        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn update_quantity_overwrites() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::new(250, 2)).with_quantity(4))?;
        cart.update_quantity(MenuItemId::new(1), 1)?;

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Decimal::new(250, 2));

        Ok(())
    }

    #[test]
    fn update_quantity_zero_removes_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::ONE))?;
        cart.update_quantity(MenuItemId::new(1), 0)?;

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn update_quantity_for_absent_item_is_noop() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::ONE))?;

        let before = cart.clone();

        cart.update_quantity(MenuItemId::new(2), 5)?;

        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn clear_resets_total() -> TestResult {
        let mut cart = Cart::new();

        cart.add(line(1, Decimal::TEN))?;
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);

        Ok(())
    }
}
