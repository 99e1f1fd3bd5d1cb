use thiserror::Error;

/// Errors raised at the edges of the catalog: parsing user input and
/// validating configuration. Querying itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown sort key '{0}'; expected relevance/title/year/rating")]
    UnknownSortKey(String),

    #[error("unknown availability filter '{0}'; expected all/available/unavailable")]
    UnknownAvailability(String),

    #[error("catalog page size must be greater than zero")]
    ZeroPageSize,

    #[error("no book with id {0} in the catalog")]
    BookNotFound(u32),
}
