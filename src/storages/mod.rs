use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::errors::Result;

pub mod models;
pub mod sqlite;

pub use models::UrlMapping;

/// Durable alias -> URL mapping store.
///
/// Implementations must be safe under concurrent invocation from many
/// request handlers; the backing engine's own locking is the concurrency
/// boundary, no application-level locks are layered on top.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a new mapping and return the assigned record id.
    ///
    /// Fails with `AliasExists` when the alias is already taken, so the
    /// caller can retry with a fresh draw.
    async fn create(&self, alias: &str, original_url: &str) -> Result<i64>;

    /// Look up a single mapping. `Ok(None)` means the alias is absent;
    /// I/O failures are kept distinct as `Err`.
    async fn get(&self, alias: &str) -> Result<Option<UrlMapping>>;

    /// All mappings, id-ascending.
    async fn load_all(&self) -> Result<Vec<UrlMapping>>;

    /// Remove a mapping. Idempotent: removing an absent alias succeeds.
    async fn remove(&self, alias: &str) -> Result<()>;

    async fn get_backend_name(&self) -> String;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &Config) -> Result<Arc<dyn Storage>> {
        let boxed: Box<dyn Storage> =
            Box::new(sqlite::SqliteStorage::new_async(&config.db_file).await?);

        Ok(Arc::from(boxed))
    }
}
