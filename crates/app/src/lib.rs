//! Foxi application layer: REST client, order session and polling.

pub mod api;
pub mod config;
pub mod context;
pub mod session;

#[cfg(test)]
mod test;
