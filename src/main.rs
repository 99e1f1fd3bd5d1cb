use anyhow::Context;
use lectern_app::catalog::{BookSource, CatalogView};
use lectern_kernel::settings::Settings;
use lectern_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Lectern settings")?;
    lectern_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, "lectern-app bootstrap starting");

    let mut registry = ModuleRegistry::new();
    let modules = lectern_app::modules::register_all(&mut registry, &settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let view = CatalogView::new(modules.catalog.source().clone(), settings.catalog.page_size)?;
    let page = view.page();
    tracing::info!(
        books = view.source().books().len(),
        total_pages = page.total_pages,
        genres = view.facets().genres.len().saturating_sub(1),
        "catalog ready"
    );

    registry.stop_all().await?;
    tracing::info!("lectern-app bootstrap complete");
    Ok(())
}
