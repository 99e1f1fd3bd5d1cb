pub mod collation;
pub mod error;
pub mod facets;
pub mod models;
pub mod query;
pub mod source;
pub mod view;

use std::sync::Arc;

use async_trait::async_trait;
use lectern_kernel::{InitCtx, Module};

use crate::utils;

pub use error::CatalogError;
pub use facets::Facets;
pub use models::Book;
pub use query::{run_query, Availability, CatalogPage, CatalogQuery, SortKey, ALL};
pub use source::{BookSource, StaticCatalog};
pub use view::{CatalogView, PagerState};

/// Catalog module: owns the read-only book source for the process
pub struct CatalogModule {
    source: Arc<dyn BookSource>,
}

impl CatalogModule {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn BookSource> {
        &self.source
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.catalog.page_size == 0 {
            return Err(CatalogError::ZeroPageSize.into());
        }

        let prefix = utils::log_prefix(self.name());
        tracing::info!(
            %prefix,
            environment = ?ctx.settings.environment,
            books = self.source.books().len(),
            page_size = ctx.settings.catalog.page_size,
            "catalog module initialized"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

/// Create the catalog module over the bundled sample collection
pub fn create_module() -> Arc<CatalogModule> {
    Arc::new(CatalogModule::new(Arc::new(StaticCatalog::sample())))
}
