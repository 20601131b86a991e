use std::{io, path::PathBuf};

use clap::Args;
use foxi::money::koruna;
use foxi_app::context::AppContext;
use tracing::info;

use crate::{cart_file::CartFile, commands::CommandError, render};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// YAML file with the restaurant, delivery details and cart items
    cart: PathBuf,
}

pub(crate) async fn run(
    args: CheckoutArgs,
    context: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    let cart = CartFile::load(&args.cart)?;
    let session = context.session();

    for line in cart.lines()? {
        session.add_to_cart(line)?;
    }

    info!(
        lines = session.cart().len(),
        items = session.cart_item_count(),
        "loaded cart"
    );

    writeln!(
        out,
        "Cart: {} items, {}",
        session.cart_item_count(),
        koruna(session.cart_total())
    )?;

    let order = session.create_order(cart.delivery()).await?;

    render::write_order(out, &order)?;

    Ok(())
}
