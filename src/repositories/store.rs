//! Storage abstractions the services depend on.
//!
//! The PostgreSQL repositories implement these traits; services hold them as
//! `Arc<dyn …>` so tests can substitute in-memory stores.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    AvgCheckByHour, BirthdaySum, Client, ClientChanges, ClientFilter, NewClient, NewOrder, Order,
    OrderChanges, OrderFilter,
};

/// Persistence operations for clients
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// All clients, ordered by id
    async fn list(&self) -> AppResult<Vec<Client>>;

    /// A window of clients ordered by id
    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Client>>;

    async fn find_by_id(&self, client_id: i32) -> AppResult<Option<Client>>;

    /// Clients matching every populated field of `filter`
    async fn find_filtered(&self, filter: &ClientFilter) -> AppResult<Vec<Client>>;

    async fn create(&self, new_client: NewClient) -> AppResult<Client>;

    /// Replaces the row; `None` when no row has this id
    async fn update(&self, client_id: i32, changes: ClientChanges) -> AppResult<Option<Client>>;

    /// Removes the row and, through the foreign key, its orders
    async fn delete(&self, client_id: i32) -> AppResult<bool>;

    async fn exists(&self, client_id: i32) -> AppResult<bool>;
}

/// Persistence operations for orders and the order reports
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, ordered by id
    async fn list(&self) -> AppResult<Vec<Order>>;

    /// Orders joined with their owning client
    async fn list_with_clients(&self) -> AppResult<Vec<(Order, Client)>>;

    /// A window of orders ordered by id
    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Order>>;

    async fn find_by_id(&self, order_id: i32) -> AppResult<Option<Order>>;

    /// Orders matching every applicable field of `filter`
    async fn find_filtered(&self, filter: &OrderFilter) -> AppResult<Vec<Order>>;

    async fn create(&self, new_order: NewOrder) -> AppResult<Order>;

    /// Replaces the row; `None` when no row has this id
    async fn update(&self, order_id: i32, changes: OrderChanges) -> AppResult<Option<Order>>;

    async fn delete(&self, order_id: i32) -> AppResult<bool>;

    async fn exists(&self, order_id: i32) -> AppResult<bool>;

    /// Rows of `get_avg_check_by_hour()`
    async fn avg_check_by_hour(&self) -> AppResult<Vec<AvgCheckByHour>>;

    /// Rows of `get_sum_by_client_on_birthday()`
    async fn sum_on_birthday(&self) -> AppResult<Vec<BirthdaySum>>;
}
