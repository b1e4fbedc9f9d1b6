//! Order service for business logic operations.
//!
//! Besides plain CRUD it exposes the joined listing and the two reports,
//! which are computed by stored SQL functions and returned untouched.

use std::sync::Arc;

use validator::Validate;

use super::page_window;
use crate::error::{AppError, AppResult};
use crate::models::{
    AvgCheckByHour, BirthdaySum, Client, NewOrder, Order, OrderChanges, OrderFilter,
};
use crate::repositories::OrderStore;

/// Order service wrapping an [`OrderStore`].
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Order>> {
        tracing::debug!("Listing orders");
        self.store.list().await
    }

    /// Lists every order paired with the client that placed it.
    pub async fn list_with_clients(&self) -> AppResult<Vec<(Order, Client)>> {
        tracing::debug!("Listing orders with clients");
        self.store.list_with_clients().await
    }

    pub async fn list_by_page(&self, page: i64, page_size: i64) -> AppResult<Vec<Order>> {
        let (offset, limit) = page_window(page, page_size)?;
        tracing::debug!(page, page_size, "Listing orders by page");
        self.store.list_page(offset, limit).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<Order>> {
        tracing::debug!(order_id = id, "Fetching order");
        self.store.find_by_id(id).await
    }

    /// Lists orders matching the filter.
    ///
    /// Non-positive `amount` and `client_id` values do not filter.
    pub async fn list_filtered(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        filter.validate()?;
        tracing::debug!(?filter, "Filtering orders");
        self.store.find_filtered(filter).await
    }

    /// Inserts an order.
    ///
    /// # Errors
    /// `Database` when `client_id` names no client; nothing is persisted.
    pub async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let client_id = new_order.client_id;
        let order = self.store.create(new_order).await.inspect_err(|e| {
            tracing::error!(client_id, error = ?e, "Order insert failed");
        })?;
        tracing::info!(order_id = order.id, client_id, "Order created");
        Ok(order)
    }

    /// Replaces an order's fields; same not-found rules as client updates.
    pub async fn update(&self, id: i32, changes: OrderChanges) -> AppResult<Option<Order>> {
        match self.store.update(id, changes).await {
            Ok(Some(order)) => {
                tracing::info!(order_id = id, status = %order.status, "Order updated");
                Ok(Some(order))
            }
            Ok(None) => Ok(None),
            Err(err @ AppError::WriteConflict { .. }) => {
                if self.store.exists(id).await? {
                    tracing::error!(order_id = id, error = ?err, "Order update conflicted");
                    Err(err)
                } else {
                    Ok(None)
                }
            }
            Err(err) => Err(err),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            tracing::info!(order_id = id, "Order deleted");
        }
        Ok(deleted)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.store.exists(id).await
    }

    /// Average completed-order amount per UTC hour, highest first.
    pub async fn report_avg(&self) -> AppResult<Vec<AvgCheckByHour>> {
        tracing::debug!("Running average-check report");
        self.store.avg_check_by_hour().await
    }

    /// Per-client totals of completed orders placed on the client's birthday.
    pub async fn report_sum(&self) -> AppResult<Vec<BirthdaySum>> {
        tracing::debug!("Running birthday-sum report");
        self.store.sum_on_birthday().await
    }
}
