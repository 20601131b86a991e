//! Commands

use std::io;

use clap::Subcommand;
use foxi::cart::CartError;
use foxi_app::{context::AppContext, session::OrderError};
use thiserror::Error;

use crate::{cart_file::CartFileError, shutdown::ShutdownSignalError};

mod checkout;
mod orders;

/// Command failures.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    /// Order operation failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Cart file could not be used.
    #[error(transparent)]
    CartFile(#[from] CartFileError),

    /// A cart line was rejected.
    #[error("invalid cart: {0}")]
    Cart(#[from] CartError),

    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    /// Signal handlers could not be installed.
    #[error(transparent)]
    Shutdown(#[from] ShutdownSignalError),
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Browse and manage orders
    Orders(orders::OrdersCommand),

    /// Submit a cart file as a new order
    Checkout(checkout::CheckoutArgs),
}

impl Command {
    pub(crate) async fn run(
        self,
        context: &AppContext,
        out: &mut impl io::Write,
    ) -> Result<(), CommandError> {
        match self {
            Self::Orders(command) => orders::run(command, context, out).await,
            Self::Checkout(args) => checkout::run(args, context, out).await,
        }
    }
}
