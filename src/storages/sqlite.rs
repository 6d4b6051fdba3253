use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::{debug, info, warn};

use super::{Storage, UrlMapping};
use crate::errors::{Result, ShortlyError};
use async_trait::async_trait;

pub struct SqliteStorage {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStorage {
    pub async fn new_async(db_path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(db_path).with_init(|c| {
            // 启用 WAL 模式以支持并发读取
            c.execute_batch(
                "PRAGMA synchronous = NORMAL;
                 PRAGMA temp_store = memory;
                 PRAGMA journal_mode = WAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(16)
            .connection_timeout(std::time::Duration::from_secs(10))
            .build(manager)
            .map_err(|e| {
                ShortlyError::database_connection(format!("Failed to create pool: {}", e))
            })?;

        let storage = SqliteStorage { pool };
        storage.init_db()?;

        warn!("SqliteStorage initialized, database path: {}", db_path);
        Ok(storage)
    }

    fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| {
            ShortlyError::database_connection(format!("Failed to get connection: {}", e))
        })
    }

    /// Idempotent schema setup, safe to run on every process start.
    fn init_db(&self) -> Result<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS urls (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                short_url TEXT NOT NULL,
                original_url TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| ShortlyError::database_operation(format!("Failed to create table: {}", e)))?;

        // 唯一索引保证别名不重复，同时兼容建索引前创建的旧库
        conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_urls_short_url ON urls(short_url)",
            [],
        )
        .map_err(|e| {
            ShortlyError::database_operation(format!("Failed to create unique index: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create(&self, alias: &str, original_url: &str) -> Result<i64> {
        let pool = self.pool.clone();
        let alias = alias.to_string();
        let original_url = original_url.to_string();

        let result = actix_web::web::block(move || -> Result<i64> {
            let conn = pool.get().map_err(|e| {
                ShortlyError::database_connection(format!("Failed to get connection: {}", e))
            })?;

            conn.execute(
                "INSERT INTO urls (short_url, original_url) VALUES (?1, ?2)",
                params![alias, original_url],
            )
            .map_err(ShortlyError::from)?;

            Ok(conn.last_insert_rowid())
        })
        .await;

        match result {
            Ok(Ok(id)) => {
                debug!("Mapping inserted with id {}", id);
                Ok(id)
            }
            Ok(Err(e)) => Err(e),
            Err(e) => Err(ShortlyError::database_operation(format!(
                "Blocking task failed: {:?}",
                e
            ))),
        }
    }

    async fn get(&self, alias: &str) -> Result<Option<UrlMapping>> {
        let pool = self.pool.clone();
        let alias = alias.to_string();

        let result = actix_web::web::block(move || {
            let conn = pool.get().map_err(|e| {
                ShortlyError::database_connection(format!("Failed to get connection: {}", e))
            })?;

            let mut stmt = conn
                .prepare("SELECT id, short_url, original_url FROM urls WHERE short_url = ?1")
                .map_err(ShortlyError::from)?;

            let row = stmt.query_row(params![alias], |row| {
                Ok(UrlMapping {
                    id: row.get(0)?,
                    alias: row.get(1)?,
                    original_url: row.get(2)?,
                })
            });

            match row {
                Ok(mapping) => Ok(Some(mapping)),
                // 别名不存在与 I/O 失败必须区分开
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(ShortlyError::from(e)),
            }
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(e) => Err(ShortlyError::database_operation(format!(
                "Blocking task failed: {:?}",
                e
            ))),
        }
    }

    async fn load_all(&self) -> Result<Vec<UrlMapping>> {
        let pool = self.pool.clone();

        let result = actix_web::web::block(move || {
            let conn = pool.get().map_err(|e| {
                ShortlyError::database_connection(format!("Failed to get connection: {}", e))
            })?;

            let mut stmt = conn
                .prepare("SELECT id, short_url, original_url FROM urls ORDER BY id ASC")
                .map_err(ShortlyError::from)?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(UrlMapping {
                        id: row.get(0)?,
                        alias: row.get(1)?,
                        original_url: row.get(2)?,
                    })
                })
                .map_err(ShortlyError::from)?;

            let mut mappings = Vec::new();
            for row in rows {
                mappings.push(row.map_err(ShortlyError::from)?);
            }

            Ok(mappings)
        })
        .await;

        match result {
            Ok(Ok(mappings)) => {
                info!("Loaded {} url mappings", mappings.len());
                Ok(mappings)
            }
            Ok(Err(e)) => Err(e),
            Err(e) => Err(ShortlyError::database_operation(format!(
                "Blocking task failed: {:?}",
                e
            ))),
        }
    }

    async fn remove(&self, alias: &str) -> Result<()> {
        let pool = self.pool.clone();
        let alias = alias.to_string();

        let result = actix_web::web::block(move || {
            let conn = pool.get().map_err(|e| {
                ShortlyError::database_connection(format!("Failed to get connection: {}", e))
            })?;

            let rows_affected = conn
                .execute("DELETE FROM urls WHERE short_url = ?1", params![alias])
                .map_err(ShortlyError::from)?;

            // 删除不存在的别名不算错误，幂等
            if rows_affected == 0 {
                debug!("Delete matched no rows for alias: {}", alias);
            } else {
                info!("Mapping deleted: {}", alias);
            }

            Ok(())
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(e) => Err(ShortlyError::database_operation(format!(
                "Blocking task failed: {:?}",
                e
            ))),
        }
    }

    async fn get_backend_name(&self) -> String {
        "sqlite".to_string()
    }
}
