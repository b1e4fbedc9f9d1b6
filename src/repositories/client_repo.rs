//! Client repository for async database operations.
//!
//! Provides CRUD and filter queries for the `clients` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::date_parts::{DAY, MONTH, YEAR, date_part_of_date};
use super::store::ClientStore;
use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Client, ClientChanges, ClientFilter, NewClient};

/// PostgreSQL-backed client repository
#[derive(Clone)]
pub struct ClientRepository {
    pool: AsyncDbPool,
}

impl ClientRepository {
    /// Creates a new ClientRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn list(&self) -> AppResult<Vec<Client>> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        clients
            .order(id.asc())
            .select(Client::as_select())
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("list clients"))
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Client>> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        clients
            .order(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Client::as_select())
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("list clients page"))
    }

    async fn find_by_id(&self, client_id: i32) -> AppResult<Option<Client>> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        clients
            .find(client_id)
            .select(Client::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DatabaseErrorConverter::with_operation("find client"))
    }

    async fn find_filtered(&self, filter: &ClientFilter) -> AppResult<Vec<Client>> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        let mut query = clients.select(Client::as_select()).into_boxed();

        if let Some(name) = filter.first_name() {
            query = query.filter(first_name.eq(name.to_string()));
        }
        if let Some(name) = filter.second_name() {
            query = query.filter(second_name.eq(name.to_string()));
        }
        if let Some(day) = filter.day {
            query = query.filter(date_part_of_date(DAY, birth_date).eq(f64::from(day)));
        }
        if let Some(month) = filter.month {
            query = query.filter(date_part_of_date(MONTH, birth_date).eq(f64::from(month)));
        }
        if let Some(year) = filter.year {
            query = query.filter(date_part_of_date(YEAR, birth_date).eq(f64::from(year)));
        }

        query
            .order(id.asc())
            .load(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("filter clients"))
    }

    async fn create(&self, new_client: NewClient) -> AppResult<Client> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(clients)
            .values(&new_client)
            .returning(Client::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("insert client"))
    }

    async fn update(&self, client_id: i32, changes: ClientChanges) -> AppResult<Option<Client>> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(clients.find(client_id))
            .set(&changes)
            .returning(Client::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(DatabaseErrorConverter::with_operation("update client"))
    }

    async fn delete(&self, client_id: i32) -> AppResult<bool> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(clients.find(client_id))
            .execute(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("delete client"))?;
        Ok(affected > 0)
    }

    async fn exists(&self, client_id: i32) -> AppResult<bool> {
        use crate::schema::clients::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(clients.find(client_id)))
            .get_result(&mut conn)
            .await
            .map_err(DatabaseErrorConverter::with_operation("check client exists"))
    }
}
