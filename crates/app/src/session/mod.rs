//! Order Session

pub mod errors;
pub mod registry;
pub mod service;
mod watcher;

pub use errors::{Operation, OrderError};
pub use registry::{OrderRegistry, Sequence};
pub use service::{DEFAULT_STATISTICS_PERIOD, OrderSession};
pub use watcher::{DEFAULT_POLL_INTERVAL, OrderWatch};
