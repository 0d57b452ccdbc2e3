use std::sync::Arc;

use arc_swap::ArcSwapOption;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::loader::ReferenceListLoader;
use crate::catalog::store::Catalog;
use crate::catalog::violation::LoadError;
use crate::config::LoaderConfig;
use crate::parsing::source::{SourceDocument, SourceError};

#[derive(Error, Debug)]
pub enum ReloadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Holds the currently published catalog.
///
/// Readers take an `Arc` snapshot and query it without locking; loading the
/// snapshot is wait-free and never waits on a publish. A reload builds the replacement completely before swapping it in, so a
/// reader sees either the old catalog or the new one, never a mix. A failed
/// reload leaves the current catalog published.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: ArcSwapOption<Catalog>,
}

impl CatalogHandle {
    /// A handle with nothing published yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle with `catalog` already published
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            current: ArcSwapOption::new(Some(Arc::new(catalog))),
        }
    }

    /// The published catalog, if any
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Catalog>> {
        self.current.load_full()
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Publish `catalog`, replacing the current one
    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        let previous = self.current.swap(Some(Arc::clone(&catalog)));

        info!(
            lists = catalog.len(),
            entries = catalog.entry_count(),
            replaced = previous.is_some(),
            "published reference catalog"
        );
        catalog
    }

    /// Build a catalog from `documents` and publish it
    ///
    /// # Errors
    ///
    /// Returns the `LoadError` if validation fails; the current catalog is
    /// left in place.
    pub fn reload(
        &self,
        loader: &ReferenceListLoader,
        documents: &[SourceDocument],
    ) -> Result<Arc<Catalog>, LoadError> {
        match loader.load(documents) {
            Ok(catalog) => Ok(self.publish(catalog)),
            Err(e) => {
                warn!(
                    violations = e.len(),
                    kept_previous = self.is_published(),
                    "reload rejected"
                );
                Err(e)
            }
        }
    }

    /// Read every source named by `config`, then [`reload`](Self::reload)
    ///
    /// # Errors
    ///
    /// Returns `ReloadError::Source` if a source cannot be read, or
    /// `ReloadError::Load` if validation fails. The current catalog is left in
    /// place either way.
    pub fn reload_from_config(&self, config: &LoaderConfig) -> Result<Arc<Catalog>, ReloadError> {
        let documents = config.read_documents().map_err(|e| {
            warn!(error = %e, "reload aborted: could not read sources");
            e
        })?;
        let loader = ReferenceListLoader::from_config(config);
        Ok(self.reload(&loader, &documents)?)
    }
}
