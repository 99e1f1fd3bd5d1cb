pub mod context;
pub mod error;
pub mod form;
pub mod navigator;
pub mod terms;

use std::sync::Arc;

use async_trait::async_trait;
use lectern_kernel::settings::ReservationSettings;
use lectern_kernel::{InitCtx, Module};

use crate::utils;

pub use context::BookContext;
pub use error::ReservationError;
pub use form::{
    parse_date, Field, FormState, ReservationForm, ReservationOutcome, ReservationRequest,
    SubmitOutcome,
};
pub use navigator::{ChannelNavigator, Navigator, Route};
pub use terms::ReservationTerms;

/// Reservation module: hands out forms configured from settings
pub struct ReservationModule {
    settings: ReservationSettings,
}

impl ReservationModule {
    pub fn new(settings: ReservationSettings) -> Self {
        Self { settings }
    }

    /// Open a blank form for `book`, dated `today`.
    pub fn open_form(
        &self,
        book: BookContext,
        today: time::Date,
        navigator: Arc<dyn Navigator>,
    ) -> ReservationForm {
        tracing::debug!(title = %book.title, "opening reservation form");
        ReservationForm::new(book, &self.settings, today, navigator)
    }
}

#[async_trait]
impl Module for ReservationModule {
    fn name(&self) -> &'static str {
        "reservation"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let prefix = utils::log_prefix(self.name());
        tracing::info!(
            %prefix,
            environment = ?ctx.settings.environment,
            redirect_delay_ms = self.settings.redirect_delay_ms,
            hold_days = self.settings.hold_days,
            "reservation module initialized"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "reservation module stopped");
        Ok(())
    }
}

/// Create a new instance of the reservation module
pub fn create_module(settings: &ReservationSettings) -> Arc<ReservationModule> {
    Arc::new(ReservationModule::new(settings.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[tokio::test(start_paused = true)]
    async fn opened_form_uses_module_settings() {
        let settings = ReservationSettings {
            redirect_delay_ms: 50,
            hold_days: 7,
            loan_days: 21,
        };
        let module = create_module(&settings);
        let (navigator, mut routes) = ChannelNavigator::new();

        let mut form = module.open_form(BookContext::default(), date!(2026 - 10 - 17), Arc::new(navigator));
        form.set_field(Field::LastName, "Karenina");
        form.set_field(Field::FirstName, "Anna");
        form.set_field(Field::LibraryCard, "LC-1877");
        form.set_field(Field::Email, "anna@example.org");

        assert!(matches!(form.submit().unwrap(), SubmitOutcome::Accepted(_)));
        assert_eq!(
            form.confirmation_message().as_deref(),
            Some("Reservation confirmed! The book will be held for you for 7 days.")
        );
        assert_eq!(form.terms().loan_days, 21);
        assert_eq!(routes.recv().await, Some(Route::Catalog));
    }
}
