use log::{debug, info};

use crate::clients::ItunesClient;
use crate::clients::entities::{CatalogEntry, FilterCriteria};
use crate::clients::errors::{Error, Result};
use crate::clients::itunes::Entity;

// Default page size when the caller does not ask for one
const DEFAULT_LIMIT: u32 = 50;
// Largest page the remote API serves
const MAX_LIMIT: u32 = 200;

// Configuration for the CatalogLookup struct
pub struct Config {
    pub itunes: ItunesClient,
    pub limit: u32,
    pub entity: Option<Entity>,
    pub fallback_term: Option<String>,
}

pub struct ConfigBuilder {
    itunes: Option<ItunesClient>,
    limit: Option<u32>,
    entity: Option<Entity>,
    fallback_term: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            itunes: None,
            limit: None,
            entity: None,
            fallback_term: None,
        }
    }

    pub fn itunes(mut self, client: ItunesClient) -> Self {
        self.itunes = Some(client);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn fallback_term(mut self, term: impl Into<String>) -> Self {
        self.fallback_term = Some(term.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        let itunes = match self.itunes {
            Some(c) => c,
            None => ItunesClient::try_default()?,
        };
        Ok(Config {
            itunes,
            // The API caps pages at 200; out-of-range requests are clamped
            // rather than rejected
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            entity: self.entity,
            fallback_term: self.fallback_term,
        })
    }
}

// The main lookup component that performs search and filtering
pub struct CatalogLookup {
    config: Config,
}

impl CatalogLookup {
    pub fn new(config: Config) -> Self {
        CatalogLookup { config }
    }

    /// Search the catalog, optionally post-filtering by keywords.
    ///
    /// Entries come back in remote order. When a fallback term is configured
    /// and the primary search reports zero results, the fallback term is
    /// searched exactly once and its page used instead.
    pub async fn search(
        &self,
        term: &str,
        keywords: Option<&FilterCriteria>,
    ) -> Result<Vec<CatalogEntry>> {
        if term.trim().is_empty() {
            return Err(Error::ConfigurationError(
                "Search term must not be empty".into(),
            ));
        }

        info!("Searching catalog for {term:?} ...");
        let mut page = self
            .config
            .itunes
            .search(term, self.config.entity, self.config.limit)
            .await?;

        // One bounded fallback with an alternate term on an empty primary
        // result, never a retry loop
        if page.result_count == 0 {
            if let Some(alt) = &self.config.fallback_term {
                info!("No results for {term:?}. Trying {alt:?} ...");
                page = self
                    .config
                    .itunes
                    .search(alt, self.config.entity, self.config.limit)
                    .await?;
            }
        }

        let entries = match keywords {
            Some(criteria) if !criteria.is_empty() => {
                let total = page.entries.len();
                let matched: Vec<CatalogEntry> = page
                    .entries
                    .into_iter()
                    .filter(|e| criteria.matches(e))
                    .collect();
                debug!(
                    "{} of {total} entries matched the keyword filter",
                    matched.len()
                );
                matched
            }
            _ => page.entries,
        };
        Ok(entries)
    }

    /// Look up a single catalog id, keeping only track entries.
    pub async fn lookup_by_id(&self, id: u64) -> Result<Vec<CatalogEntry>> {
        info!("Looking up catalog id {id} ...");
        let page = self.config.itunes.lookup(id).await?;
        // Lookups return surrounding collection and artist records too
        let entries: Vec<CatalogEntry> = page
            .entries
            .into_iter()
            .filter(CatalogEntry::is_track)
            .collect();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_limit_into_api_range() {
        let config = ConfigBuilder::new().limit(500).build().unwrap();
        assert_eq!(config.limit, 200);
        let config = ConfigBuilder::new().limit(0).build().unwrap();
        assert_eq!(config.limit, 1);
    }

    #[test]
    fn builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.limit, 50);
        assert!(config.entity.is_none());
        assert!(config.fallback_term.is_none());
    }
}
