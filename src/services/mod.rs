//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod client_service;
mod order_service;

pub use client_service::ClientService;
pub use order_service::OrderService;

use std::sync::Arc;

use crate::error::{AppError, AppResult, ValidationFieldError};
use crate::repositories::{ClientStore, OrderStore, Repositories};

/// Largest page a paged listing may request
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the stores are shared behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub clients: ClientService,
    pub orders: OrderService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self::from_stores(Arc::new(repos.clients), Arc::new(repos.orders))
    }

    /// Builds the services over arbitrary store implementations.
    pub fn from_stores(clients: Arc<dyn ClientStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self {
            clients: ClientService::new(clients),
            orders: OrderService::new(orders),
        }
    }
}

/// Converts a 1-based page and page size into `(offset, limit)`.
pub(crate) fn page_window(page: i64, page_size: i64) -> AppResult<(i64, i64)> {
    let mut errors = Vec::new();
    if page < 1 {
        errors.push(ValidationFieldError {
            field: "page".to_string(),
            message: "Page must be at least 1".to_string(),
        });
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        errors.push(ValidationFieldError {
            field: "pageSize".to_string(),
            message: format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
        });
    }
    if !errors.is_empty() {
        return Err(AppError::ValidationErrors { errors });
    }
    let offset = (page - 1).saturating_mul(page_size);
    Ok((offset, page_size))
}
