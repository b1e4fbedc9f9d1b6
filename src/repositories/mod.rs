//! Repository layer for data access operations.
//!
//! Each repository wraps the shared connection pool and implements one of
//! the store traits the services depend on.

mod client_repo;
mod date_parts;
#[cfg(test)]
pub mod memory;
mod order_repo;
mod store;

pub use client_repo::ClientRepository;
pub use order_repo::OrderRepository;
pub use store::{ClientStore, OrderStore};

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub clients: ClientRepository,
    pub orders: OrderRepository,
}

impl Repositories {
    /// Creates every repository over the same pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }
}
