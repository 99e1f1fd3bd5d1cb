use thiserror::Error;
use time::Date;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("invalid pickup date '{0}'; expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("pickup date {requested} is before today ({today})")]
    PickupDateInPast { requested: Date, today: Date },

    #[error("no async runtime available to schedule the return to the catalog")]
    NoRuntime,
}
