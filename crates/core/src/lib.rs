//! Foxi
//!
//! Client-side ordering core for the Foxi food-ordering platform: the cart,
//! checkout drafts, orders and their status lifecycle.

pub mod cart;
pub mod ids;
pub mod money;
pub mod orders;
pub mod prelude;
