//! Client service for business logic operations.

use std::sync::Arc;

use validator::Validate;

use super::page_window;
use crate::error::{AppError, AppResult};
use crate::models::{Client, ClientChanges, ClientFilter, NewClient};
use crate::repositories::ClientStore;

/// Client service wrapping a [`ClientStore`].
///
/// Cloning is cheap; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn ClientStore>,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Client>> {
        tracing::debug!("Listing clients");
        self.store.list().await
    }

    /// Returns page `page` (1-based) of `page_size` clients ordered by id.
    pub async fn list_by_page(&self, page: i64, page_size: i64) -> AppResult<Vec<Client>> {
        let (offset, limit) = page_window(page, page_size)?;
        tracing::debug!(page, page_size, "Listing clients by page");
        self.store.list_page(offset, limit).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<Client>> {
        tracing::debug!(client_id = id, "Fetching client");
        self.store.find_by_id(id).await
    }

    /// Lists clients matching every populated field of `filter`.
    ///
    /// # Errors
    /// `ValidationErrors` when a date part is out of range
    pub async fn list_filtered(&self, filter: &ClientFilter) -> AppResult<Vec<Client>> {
        filter.validate()?;
        tracing::debug!(?filter, "Filtering clients");
        self.store.find_filtered(filter).await
    }

    pub async fn create(&self, new_client: NewClient) -> AppResult<Client> {
        let client = self.store.create(new_client).await?;
        tracing::info!(client_id = client.id, "Client created");
        Ok(client)
    }

    /// Replaces a client's fields.
    ///
    /// Returns `None` when the client does not exist, including when it was
    /// removed by a concurrent writer. A write conflict on a row that still
    /// exists is propagated.
    pub async fn update(&self, id: i32, changes: ClientChanges) -> AppResult<Option<Client>> {
        match self.store.update(id, changes).await {
            Ok(Some(client)) => {
                tracing::info!(client_id = id, "Client updated");
                Ok(Some(client))
            }
            Ok(None) => Ok(None),
            Err(err @ AppError::WriteConflict { .. }) => {
                if self.store.exists(id).await? {
                    tracing::error!(client_id = id, error = ?err, "Client update conflicted");
                    Err(err)
                } else {
                    Ok(None)
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Deletes a client together with its orders.
    ///
    /// Returns `false` if no such client existed.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            tracing::info!(client_id = id, "Client deleted");
        }
        Ok(deleted)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.store.exists(id).await
    }
}
