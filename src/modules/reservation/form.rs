//! Reservation form state: field capture, the required-field check, and the
//! one-shot simulated confirmation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use lectern_kernel::settings::ReservationSettings;
use serde::Serialize;
use time::Date;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::context::BookContext;
use super::error::ReservationError;
use super::navigator::{Navigator, Route};
use super::terms::ReservationTerms;

/// Parse a `YYYY-MM-DD` date as entered in the pickup date control.
pub fn parse_date(input: &str) -> Result<Date, ReservationError> {
    Date::parse(
        input.trim(),
        time::macros::format_description!("[year]-[month]-[day]"),
    )
    .map_err(|_| ReservationError::InvalidDate(input.to_string()))
}

/// Reader-editable text fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    LastName,
    FirstName,
    MiddleName,
    LibraryCard,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::LastName,
        Field::FirstName,
        Field::MiddleName,
        Field::LibraryCard,
        Field::Email,
        Field::Phone,
    ];

    pub fn is_required(self) -> bool {
        !matches!(self, Field::MiddleName | Field::Phone)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::LastName => "last name",
            Field::FirstName => "first name",
            Field::MiddleName => "middle name",
            Field::LibraryCard => "library card number",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    Editing,
    /// Terminal. Further submits are no-ops.
    Submitted,
}

/// Flags the presentation layer renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReservationOutcome {
    pub is_submitted: bool,
    pub show_confirmation: bool,
}

/// Snapshot of a confirmed reservation. Nothing stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub book: BookContext,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub library_card: String,
    pub email: String,
    pub phone: Option<String>,
    pub pickup_date: Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(ReservationRequest),
    Rejected { missing: Vec<Field> },
    AlreadySubmitted,
}

/// Scheduled return to the catalog. Dropping it cancels the navigation.
#[derive(Debug)]
struct PendingRedirect {
    handle: JoinHandle<()>,
}

impl PendingRedirect {
    fn schedule(runtime: &Handle, delay: Duration, navigator: Arc<dyn Navigator>) -> Self {
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(Route::Catalog);
        });
        Self { handle }
    }

    fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PendingRedirect {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::debug!("cancelling scheduled return to catalog");
        }
        self.handle.abort();
    }
}

#[derive(Debug, Default, Clone)]
struct FormFields {
    last_name: String,
    first_name: String,
    middle_name: String,
    library_card: String,
    email: String,
    phone: String,
}

impl FormFields {
    fn get(&self, field: Field) -> &str {
        match field {
            Field::LastName => &self.last_name,
            Field::FirstName => &self.first_name,
            Field::MiddleName => &self.middle_name,
            Field::LibraryCard => &self.library_card,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::LastName => &mut self.last_name,
            Field::FirstName => &mut self.first_name,
            Field::MiddleName => &mut self.middle_name,
            Field::LibraryCard => &mut self.library_card,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// The reservation view's form. Owns its fields and any pending redirect.
pub struct ReservationForm {
    book: BookContext,
    fields: FormFields,
    today: Date,
    pickup_date: Date,
    state: FormState,
    show_confirmation: bool,
    redirect_delay: Duration,
    terms: ReservationTerms,
    navigator: Arc<dyn Navigator>,
    pending: Option<PendingRedirect>,
}

impl fmt::Debug for ReservationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationForm")
            .field("book", &self.book)
            .field("state", &self.state)
            .field("pickup_date", &self.pickup_date)
            .field("redirect_pending", &self.redirect_pending())
            .finish_non_exhaustive()
    }
}

impl ReservationForm {
    /// A blank form for `book`. The pickup date starts at `today`.
    pub fn new(
        book: BookContext,
        settings: &ReservationSettings,
        today: Date,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            book,
            fields: FormFields::default(),
            today,
            pickup_date: today,
            state: FormState::Editing,
            show_confirmation: false,
            redirect_delay: settings.redirect_delay(),
            terms: ReservationTerms::from_settings(settings),
            navigator,
            pending: None,
        }
    }

    pub fn terms(&self) -> ReservationTerms {
        self.terms
    }

    pub fn book(&self) -> &BookContext {
        &self.book
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    /// Update a text field. Ignored once the form is submitted.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if self.state == FormState::Submitted {
            tracing::debug!(%field, "ignoring edit on submitted reservation");
            return;
        }
        *self.fields.slot(field) = value.into();
    }

    pub fn pickup_date(&self) -> Date {
        self.pickup_date
    }

    /// Earliest selectable pickup date.
    pub fn min_pickup_date(&self) -> Date {
        self.today
    }

    /// Choose the pickup date. Ignored once the form is submitted.
    pub fn set_pickup_date(&mut self, date: Date) -> Result<(), ReservationError> {
        if self.state == FormState::Submitted {
            tracing::debug!(%date, "ignoring pickup date change on submitted reservation");
            return Ok(());
        }
        let earliest = self.min_pickup_date();
        if date < earliest {
            return Err(ReservationError::PickupDateInPast {
                requested: date,
                today: earliest,
            });
        }
        self.pickup_date = date;
        Ok(())
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.fields.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.state == FormState::Editing && self.is_valid()
    }

    pub fn outcome(&self) -> ReservationOutcome {
        ReservationOutcome {
            is_submitted: self.state == FormState::Submitted,
            show_confirmation: self.show_confirmation,
        }
    }

    /// Notice shown after a successful submit.
    pub fn confirmation_message(&self) -> Option<String> {
        self.show_confirmation.then(|| {
            format!(
                "Reservation confirmed! The book will be held for you for {} days.",
                self.terms.hold_days
            )
        })
    }

    pub fn redirect_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(PendingRedirect::is_pending)
    }

    /// Confirm the reservation and schedule the return to the catalog.
    ///
    /// Must be called from within a tokio runtime; without one the form stays
    /// in `Editing` and [`ReservationError::NoRuntime`] is returned.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ReservationError> {
        if self.state == FormState::Submitted {
            tracing::debug!(title = %self.book.title, "reservation already submitted");
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "reservation incomplete");
            return Ok(SubmitOutcome::Rejected { missing });
        }

        let runtime = Handle::try_current().map_err(|_| ReservationError::NoRuntime)?;
        let request = self.request();

        self.state = FormState::Submitted;
        self.show_confirmation = true;
        self.pending = Some(PendingRedirect::schedule(
            &runtime,
            self.redirect_delay,
            Arc::clone(&self.navigator),
        ));

        tracing::info!(
            title = %request.book.title,
            isbn = %request.book.isbn,
            pickup_date = %request.pickup_date,
            redirect_ms = self.redirect_delay.as_millis() as u64,
            "reservation confirmed"
        );

        Ok(SubmitOutcome::Accepted(request))
    }

    /// Leave the form now, dropping any scheduled redirect.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.navigator.navigate(Route::Catalog);
    }

    fn request(&self) -> ReservationRequest {
        ReservationRequest {
            book: self.book.clone(),
            last_name: self.fields.last_name.trim().to_string(),
            first_name: self.fields.first_name.trim().to_string(),
            middle_name: optional(&self.fields.middle_name),
            library_card: self.fields.library_card.trim().to_string(),
            email: self.fields.email.trim().to_string(),
            phone: optional(&self.fields.phone),
            pickup_date: self.pickup_date,
        }
    }
}
