//! Money
//!
//! Menu prices and order totals are quoted in Czech koruna.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Wrap a decimal amount as koruna for display.
pub fn koruna(amount: Decimal) -> Money<'static, Currency> {
    Money::from_decimal(amount, iso::CZK)
}
