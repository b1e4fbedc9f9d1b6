//! In-memory store used by service and handler tests.
//!
//! Mirrors the observable behavior of the PostgreSQL repositories: ids are
//! assigned sequentially, orders require an existing client, deleting a
//! client removes its orders, and reports only consider completed orders.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use jiff::tz::TimeZone;

use super::store::{ClientStore, OrderStore};
use crate::error::{AppError, AppResult};
use crate::models::{
    AvgCheckByHour, BirthdaySum, Client, ClientChanges, ClientFilter, NewClient, NewOrder, Order,
    OrderChanges, OrderFilter, OrderStatus,
};

/// How the next `update` call should misbehave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Raise a write conflict and leave the row in place
    RowKept,
    /// Delete the row, then raise a write conflict
    RowDeleted,
}

#[derive(Default)]
struct State {
    clients: BTreeMap<i32, Client>,
    orders: BTreeMap<i32, Order>,
    next_client_id: i32,
    next_order_id: i32,
    conflict: Option<Conflict>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next client or order update fail with a write conflict
    pub fn conflict_on_next_update(&self, conflict: Conflict) {
        self.state.lock().unwrap().conflict = Some(conflict);
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    fn write_conflict(operation: &str) -> AppError {
        AppError::WriteConflict {
            operation: operation.to_string(),
            source: anyhow::anyhow!("could not serialize access due to concurrent update"),
        }
    }
}

fn window<T: Clone>(rows: Vec<T>, offset: i64, limit: i64) -> Vec<T> {
    rows.into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

fn client_matches(client: &Client, filter: &ClientFilter) -> bool {
    let birth = client.birth_date.to_jiff();
    filter.first_name().is_none_or(|n| client.first_name == n)
        && filter.second_name().is_none_or(|n| client.second_name == n)
        && filter.day.is_none_or(|d| i32::from(birth.day()) == d)
        && filter.month.is_none_or(|m| i32::from(birth.month()) == m)
        && filter.year.is_none_or(|y| i32::from(birth.year()) == y)
}

fn order_matches(order: &Order, filter: &OrderFilter) -> bool {
    let placed = order.order_datetime.to_jiff().to_zoned(TimeZone::UTC);
    filter.min_amount().is_none_or(|a| order.amount > *a)
        && filter.status.is_none_or(|s| order.status == s)
        && filter.day.is_none_or(|d| i32::from(placed.day()) == d)
        && filter.month.is_none_or(|m| i32::from(placed.month()) == m)
        && filter.year.is_none_or(|y| i32::from(placed.year()) == y)
        && filter.client().is_none_or(|c| order.client_id == c)
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Client>> {
        Ok(self.state.lock().unwrap().clients.values().cloned().collect())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Client>> {
        let rows = ClientStore::list(self).await?;
        Ok(window(rows, offset, limit))
    }

    async fn find_by_id(&self, client_id: i32) -> AppResult<Option<Client>> {
        Ok(self.state.lock().unwrap().clients.get(&client_id).cloned())
    }

    async fn find_filtered(&self, filter: &ClientFilter) -> AppResult<Vec<Client>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .clients
            .values()
            .filter(|c| client_matches(c, filter))
            .cloned()
            .collect())
    }

    async fn create(&self, new_client: NewClient) -> AppResult<Client> {
        let mut state = self.state.lock().unwrap();
        state.next_client_id += 1;
        let client = Client {
            id: state.next_client_id,
            first_name: new_client.first_name,
            second_name: new_client.second_name,
            birth_date: new_client.birth_date,
        };
        state.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update(&self, client_id: i32, changes: ClientChanges) -> AppResult<Option<Client>> {
        let mut state = self.state.lock().unwrap();
        match state.conflict.take() {
            Some(Conflict::RowKept) => return Err(Self::write_conflict("update client")),
            Some(Conflict::RowDeleted) => {
                state.clients.remove(&client_id);
                return Err(Self::write_conflict("update client"));
            }
            None => {}
        }
        Ok(state.clients.get_mut(&client_id).map(|client| {
            client.first_name = changes.first_name;
            client.second_name = changes.second_name;
            client.birth_date = changes.birth_date;
            client.clone()
        }))
    }

    async fn delete(&self, client_id: i32) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let removed = state.clients.remove(&client_id).is_some();
        if removed {
            state.orders.retain(|_, o| o.client_id != client_id);
        }
        Ok(removed)
    }

    async fn exists(&self, client_id: i32) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().clients.contains_key(&client_id))
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Order>> {
        Ok(self.state.lock().unwrap().orders.values().cloned().collect())
    }

    async fn list_with_clients(&self) -> AppResult<Vec<(Order, Client)>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .values()
            .filter_map(|o| {
                state
                    .clients
                    .get(&o.client_id)
                    .map(|c| (o.clone(), c.clone()))
            })
            .collect())
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Order>> {
        let rows = OrderStore::list(self).await?;
        Ok(window(rows, offset, limit))
    }

    async fn find_by_id(&self, order_id: i32) -> AppResult<Option<Order>> {
        Ok(self.state.lock().unwrap().orders.get(&order_id).cloned())
    }

    async fn find_filtered(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .values()
            .filter(|o| order_matches(o, filter))
            .cloned()
            .collect())
    }

    async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let mut state = self.state.lock().unwrap();
        if !state.clients.contains_key(&new_order.client_id) {
            return Err(AppError::Database {
                operation: "insert order".to_string(),
                source: anyhow::anyhow!("Foreign key constraint violation"),
            });
        }
        state.next_order_id += 1;
        let order = Order {
            id: state.next_order_id,
            amount: new_order.amount,
            status: new_order.status,
            order_datetime: new_order.order_datetime,
            client_id: new_order.client_id,
        };
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, order_id: i32, changes: OrderChanges) -> AppResult<Option<Order>> {
        let mut state = self.state.lock().unwrap();
        match state.conflict.take() {
            Some(Conflict::RowKept) => return Err(Self::write_conflict("update order")),
            Some(Conflict::RowDeleted) => {
                state.orders.remove(&order_id);
                return Err(Self::write_conflict("update order"));
            }
            None => {}
        }
        if !state.orders.contains_key(&order_id) {
            return Ok(None);
        }
        if !state.clients.contains_key(&changes.client_id) {
            return Err(AppError::Database {
                operation: "update order".to_string(),
                source: anyhow::anyhow!("Foreign key constraint violation"),
            });
        }
        Ok(state.orders.get_mut(&order_id).map(|order| {
            order.amount = changes.amount;
            order.status = changes.status;
            order.order_datetime = changes.order_datetime;
            order.client_id = changes.client_id;
            order.clone()
        }))
    }

    async fn delete(&self, order_id: i32) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().orders.remove(&order_id).is_some())
    }

    async fn exists(&self, order_id: i32) -> AppResult<bool> {
        Ok(self.state.lock().unwrap().orders.contains_key(&order_id))
    }

    async fn avg_check_by_hour(&self) -> AppResult<Vec<AvgCheckByHour>> {
        let state = self.state.lock().unwrap();
        let mut by_hour: BTreeMap<i32, (BigDecimal, u32)> = BTreeMap::new();
        for order in state.orders.values() {
            if order.status != OrderStatus::Completed {
                continue;
            }
            let hour = i32::from(order.order_datetime.to_jiff().to_zoned(TimeZone::UTC).hour());
            let entry = by_hour.entry(hour).or_insert((BigDecimal::from(0), 0));
            entry.0 += &order.amount;
            entry.1 += 1;
        }
        let mut rows: Vec<AvgCheckByHour> = by_hour
            .into_iter()
            .map(|(hour, (sum, count))| AvgCheckByHour {
                hour,
                avg_check: sum / BigDecimal::from(count),
            })
            .collect();
        rows.sort_by(|a, b| b.avg_check.cmp(&a.avg_check));
        Ok(rows)
    }

    async fn sum_on_birthday(&self) -> AppResult<Vec<BirthdaySum>> {
        let state = self.state.lock().unwrap();
        let mut sums: BTreeMap<i32, BirthdaySum> = BTreeMap::new();
        for order in state.orders.values() {
            if order.status != OrderStatus::Completed {
                continue;
            }
            let Some(client) = state.clients.get(&order.client_id) else {
                continue;
            };
            let placed = order.order_datetime.to_jiff().to_zoned(TimeZone::UTC);
            let birth = client.birth_date.to_jiff();
            if placed.month() != birth.month() || placed.day() != birth.day() {
                continue;
            }
            sums.entry(client.id)
                .or_insert_with(|| BirthdaySum {
                    client_id: client.id,
                    first_name: client.first_name.clone(),
                    second_name: client.second_name.clone(),
                    total_sum: BigDecimal::from(0),
                })
                .total_sum += &order.amount;
        }
        Ok(sums.into_values().collect())
    }
}
