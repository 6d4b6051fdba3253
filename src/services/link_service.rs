//! Link management service
//!
//! The four core operations exposed to the HTTP layer: create, resolve,
//! list and delete. Callers hand in raw input; everything past this seam
//! works on normalized URLs and store-assigned records.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{Result, ShortlyError};
use crate::storages::{Storage, UrlMapping};
use crate::utils::{normalize_url, AliasGenerator};

/// Bounded retry budget when a freshly drawn alias is already taken.
const MAX_ALIAS_ATTEMPTS: usize = 5;

/// Extra characters for the single widened draw after the budget is spent.
const FALLBACK_EXTRA_LENGTH: usize = 2;

pub struct LinkService {
    storage: Arc<dyn Storage>,
    generator: AliasGenerator,
}

impl LinkService {
    pub fn new(storage: Arc<dyn Storage>, generator: AliasGenerator) -> Self {
        Self { storage, generator }
    }

    /// Create a new mapping for a raw caller-supplied URL.
    ///
    /// The URL is normalized first; a drawn alias that collides with an
    /// existing record is retried up to [`MAX_ALIAS_ATTEMPTS`] times, then
    /// once more with a longer alias before giving up. A collision can
    /// therefore never produce two live records under one alias.
    pub async fn create_link(&self, raw_url: &str) -> Result<UrlMapping> {
        let original_url =
            normalize_url(raw_url).map_err(|e| ShortlyError::validation(e.to_string()))?;

        for _ in 0..MAX_ALIAS_ATTEMPTS {
            let alias = self.generator.generate();

            match self.storage.create(&alias, &original_url).await {
                Ok(id) => {
                    info!("LinkService: created '{}' -> '{}'", alias, original_url);
                    return Ok(UrlMapping {
                        id,
                        alias,
                        original_url,
                    });
                }
                Err(ShortlyError::AliasExists(_)) => {
                    warn!("Alias collision on '{}', retrying", alias);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        // 配置长度下的别名空间过于拥挤，放宽一次长度再试
        let alias = self
            .generator
            .generate_with_length(self.generator.length() + FALLBACK_EXTRA_LENGTH);

        match self.storage.create(&alias, &original_url).await {
            Ok(id) => {
                info!(
                    "LinkService: created '{}' -> '{}' (widened after {} collisions)",
                    alias, original_url, MAX_ALIAS_ATTEMPTS
                );
                Ok(UrlMapping {
                    id,
                    alias,
                    original_url,
                })
            }
            Err(ShortlyError::AliasExists(_)) => Err(ShortlyError::database_operation(format!(
                "Could not find a free alias after {} attempts",
                MAX_ALIAS_ATTEMPTS + 1
            ))),
            Err(e) => Err(e),
        }
    }

    /// Resolve an alias to its original URL. Absence is `NotFound`, kept
    /// distinct from storage failures.
    pub async fn resolve_link(&self, alias: &str) -> Result<String> {
        match self.storage.get(alias).await? {
            Some(mapping) => Ok(mapping.original_url),
            None => Err(ShortlyError::not_found(format!(
                "Alias '{}' not found",
                alias
            ))),
        }
    }

    /// All mappings, id-ascending.
    pub async fn list_links(&self) -> Result<Vec<UrlMapping>> {
        self.storage.load_all().await
    }

    /// Delete a mapping. Deleting an absent alias is a successful no-op.
    pub async fn delete_link(&self, alias: &str) -> Result<()> {
        self.storage.remove(alias).await?;
        info!("LinkService: deleted '{}'", alias);
        Ok(())
    }
}

/// Display form of a short link for a given request host.
pub fn short_link_url(host: &str, alias: &str) -> String {
    format!("http://{}/shortly/{}", host, alias)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_url() {
        assert_eq!(
            short_link_url("localhost:8080", "Ab3xZ9"),
            "http://localhost:8080/shortly/Ab3xZ9"
        );
    }
}
