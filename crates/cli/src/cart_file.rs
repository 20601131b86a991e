//! Cart file
//!
//! Checkout input read from YAML:
//!
//! ```yaml
//! restaurant: 3
//! delivery:
//!   address: Národní 1, Praha
//!   phone: "+420 777 000 111"
//! items:
//!   - menu_item: 21
//!     name: Řízek
//!     price: "8.90"
//!     quantity: 2
//! ```

use std::{fs, path::Path, str::FromStr};

use foxi::{
    cart::CartLine,
    ids::{MenuItemId, RestaurantId},
    orders::DeliveryInfo,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Cart File Errors
#[derive(Debug, Error)]
pub(crate) enum CartFileError {
    /// IO error reading the file
    #[error("Failed to read cart file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price for menu item {menu_item}: {price}")]
    InvalidPrice {
        /// Menu item with the bad price
        menu_item: MenuItemId,

        /// Raw price text
        price: String,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeliveryFixture {
    address: String,
    phone: String,
    #[serde(default)]
    special_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemFixture {
    menu_item: MenuItemId,
    name: String,
    price: String,
    #[serde(default = "one")]
    quantity: u32,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    special_instructions: Option<String>,
}

/// Cart contents and delivery details for a checkout.
#[derive(Debug, Deserialize)]
pub(crate) struct CartFile {
    restaurant: RestaurantId,
    delivery: DeliveryFixture,
    items: Vec<ItemFixture>,
}

fn one() -> u32 {
    1
}

impl CartFile {
    /// Read and parse a cart file.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self, CartFileError> {
        let contents = fs::read_to_string(path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Cart lines in file order.
    pub(crate) fn lines(&self) -> Result<Vec<CartLine>, CartFileError> {
        self.items
            .iter()
            .map(|item| {
                let price = Decimal::from_str(item.price.trim()).map_err(|_err| {
                    CartFileError::InvalidPrice {
                        menu_item: item.menu_item,
                        price: item.price.clone(),
                    }
                })?;

                let mut line = CartLine::new(item.menu_item, self.restaurant, &item.name, price)
                    .with_quantity(item.quantity);

                if let Some(image) = &item.image {
                    line = line.with_image(image);
                }

                if let Some(instructions) = &item.special_instructions {
                    line = line.with_special_instructions(instructions);
                }

                Ok(line)
            })
            .collect()
    }

    /// Delivery details.
    pub(crate) fn delivery(&self) -> DeliveryInfo {
        DeliveryInfo {
            address: self.delivery.address.clone(),
            phone: self.delivery.phone.clone(),
            special_instructions: self.delivery.special_instructions.clone(),
        }
    }
}
