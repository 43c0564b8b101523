//! Trait and helpers for supplying the list of known junctions.

use anyhow::Result;
use tracing::{debug, warn};

use crate::junction::{Junction, JunctionId};

/// Abstraction over a junction catalog provider (static table or backend).
#[async_trait::async_trait]
pub trait JunctionCatalog: Send + Sync {
    /// Returns the junctions a user may pick as source or destination.
    async fn list_junctions(&self) -> Result<Vec<Junction>>;
}

/// The four junctions served when no live catalog is reachable.
pub fn fallback_junctions() -> Vec<Junction> {
    (1..=4)
        .filter_map(JunctionId::new)
        .map(Junction::unnamed)
        .collect()
}

/// A fixed in-memory catalog.
#[derive(Debug, Clone)]
pub struct StaticJunctionCatalog {
    junctions: Vec<Junction>,
}

impl StaticJunctionCatalog {
    pub fn new(junctions: Vec<Junction>) -> Self {
        Self { junctions }
    }

    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }
}

impl Default for StaticJunctionCatalog {
    fn default() -> Self {
        Self::new(fallback_junctions())
    }
}

#[async_trait::async_trait]
impl JunctionCatalog for StaticJunctionCatalog {
    async fn list_junctions(&self) -> Result<Vec<Junction>> {
        Ok(self.junctions.clone())
    }
}

/// Loads the catalog, degrading to [`fallback_junctions`] on any failure.
///
/// An empty catalog counts as a failure: the selectors would have nothing
/// to offer.
pub async fn fetch_junctions<K: JunctionCatalog + ?Sized>(catalog: &K) -> Vec<Junction> {
    match catalog.list_junctions().await {
        Ok(junctions) if !junctions.is_empty() => {
            debug!(count = junctions.len(), "Junction catalog loaded");
            junctions
        }
        Ok(_) => {
            warn!("Junction catalog is empty, using fallback junctions");
            fallback_junctions()
        }
        Err(e) => {
            warn!(error = %e, "Junction catalog unavailable, using fallback junctions");
            fallback_junctions()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenCatalog;

    #[async_trait::async_trait]
    impl JunctionCatalog for BrokenCatalog {
        async fn list_junctions(&self) -> Result<Vec<Junction>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    fn ids(junctions: &[Junction]) -> Vec<u32> {
        junctions.iter().map(|j| j.id.get()).collect()
    }

    #[test]
    fn test_fallback_has_four_junctions() {
        let junctions = fallback_junctions();
        assert_eq!(ids(&junctions), vec![1, 2, 3, 4]);
        assert_eq!(junctions[0].name, "Junction 1");
    }

    #[tokio::test]
    async fn test_failure_degrades_to_fallback() {
        let junctions = fetch_junctions(&BrokenCatalog).await;
        assert_eq!(junctions, fallback_junctions());
    }

    #[tokio::test]
    async fn test_empty_catalog_degrades_to_fallback() {
        let catalog = StaticJunctionCatalog::new(vec![]);
        let junctions = fetch_junctions(&catalog).await;
        assert_eq!(ids(&junctions), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_live_catalog_is_passed_through() {
        let id = JunctionId::new(9).unwrap();
        let catalog = StaticJunctionCatalog::new(vec![Junction::new(id, "Airport Road")]);

        let junctions = fetch_junctions(&catalog).await;

        assert_eq!(junctions.len(), 1);
        assert_eq!(junctions[0].name, "Airport Road");
    }
}
