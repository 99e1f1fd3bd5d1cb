pub mod catalog;
pub mod reservation;

use std::sync::Arc;

use lectern_kernel::settings::Settings;
use lectern_kernel::ModuleRegistry;

/// Modules built from settings, kept as concrete handles for the caller.
pub struct AppModules {
    pub catalog: Arc<catalog::CatalogModule>,
    pub reservation: Arc<reservation::ReservationModule>,
}

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> AppModules {
    let modules = AppModules {
        catalog: catalog::create_module(),
        reservation: reservation::create_module(&settings.reservation),
    };
    registry.register(modules.catalog.clone());
    registry.register(modules.reservation.clone());
    modules
}
