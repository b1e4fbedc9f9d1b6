//! Order repository for async database operations.
//!
//! Provides CRUD and filter queries for the `orders` table, the
//! orders-with-clients join, and the two store-side reports.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::date_parts::{DAY, MONTH, ORDER_TIME_ZONE, YEAR, date_part_of_timestamp, timezone};
use super::store::OrderStore;
use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{
    AvgCheckByHour, BirthdaySum, Client, NewOrder, Order, OrderChanges, OrderFilter,
};
use crate::schema::{clients, orders};

/// PostgreSQL-backed order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: AsyncDbPool,
}

impl OrderRepository {
    /// Creates a new OrderRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn list(&self) -> AppResult<Vec<Order>> {
        let mut conn = self.pool.get().await?;

        orders::table
            .order(orders::id.asc())
            .select(Order::as_select())
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("list orders"))
    }

    async fn list_with_clients(&self) -> AppResult<Vec<(Order, Client)>> {
        let mut conn = self.pool.get().await?;

        orders::table
            .inner_join(clients::table)
            .order(orders::id.asc())
            .select((Order::as_select(), Client::as_select()))
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("list orders with clients"))
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Order>> {
        let mut conn = self.pool.get().await?;

        orders::table
            .order(orders::id.asc())
            .offset(offset)
            .limit(limit)
            .select(Order::as_select())
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("list orders page"))
    }

    async fn find_by_id(&self, order_id: i32) -> AppResult<Option<Order>> {
        let mut conn = self.pool.get().await?;

        orders::table
            .find(order_id)
            .select(Order::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DatabaseErrorConverter::with_operation("find order"))
    }

    async fn find_filtered(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let mut conn = self.pool.get().await?;

        let mut query = orders::table.select(Order::as_select()).into_boxed();

        if let Some(amount) = filter.min_amount() {
            query = query.filter(orders::amount.gt(amount.clone()));
        }
        if let Some(status) = filter.status {
            query = query.filter(orders::status.eq(status));
        }
        if let Some(day) = filter.day {
            query = query.filter(
                date_part_of_timestamp(DAY, timezone(ORDER_TIME_ZONE, orders::order_datetime))
                    .eq(f64::from(day)),
            );
        }
        if let Some(month) = filter.month {
            query = query.filter(
                date_part_of_timestamp(MONTH, timezone(ORDER_TIME_ZONE, orders::order_datetime))
                    .eq(f64::from(month)),
            );
        }
        if let Some(year) = filter.year {
            query = query.filter(
                date_part_of_timestamp(YEAR, timezone(ORDER_TIME_ZONE, orders::order_datetime))
                    .eq(f64::from(year)),
            );
        }
        if let Some(client) = filter.client() {
            query = query.filter(orders::client_id.eq(client));
        }

        query
            .order(orders::id.asc())
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("filter orders"))
    }

    async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(orders::table)
            .values(&new_order)
            .returning(Order::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("insert order"))
    }

    async fn update(&self, order_id: i32, changes: OrderChanges) -> AppResult<Option<Order>> {
        let mut conn = self.pool.get().await?;

        diesel::update(orders::table.find(order_id))
            .set(&changes)
            .returning(Order::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(DatabaseErrorConverter::with_operation("update order"))
    }

    async fn delete(&self, order_id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(orders::table.find(order_id))
            .execute(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("delete order"))?;
        Ok(affected > 0)
    }

    async fn exists(&self, order_id: i32) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(orders::table.find(order_id)))
            .get_result(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("check order exists"))
    }

    async fn avg_check_by_hour(&self) -> AppResult<Vec<AvgCheckByHour>> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT hour, avg_check FROM get_avg_check_by_hour()")
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("report average check by hour"))
    }

    async fn sum_on_birthday(&self) -> AppResult<Vec<BirthdaySum>> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query(
            "SELECT client_id, first_name, second_name, total_sum \
             FROM get_sum_by_client_on_birthday()",
        )
        .load(&mut conn)
        .await
        .map_err(DatabaseErrorConverter::with_operation("report birthday sums"))
    }
}
