//! Search, filter, sort and paginate over a borrowed collection.
//!
//! Every function here takes `&[Book]` and returns references into it, so the
//! source collection is never reordered or trimmed in place.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Serialize;

pub use super::collation::compare_titles;
use super::error::CatalogError;
use super::models::Book;

/// Filter value meaning "do not restrict by this dimension".
pub const ALL: &str = "all";

/// Shelf availability filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    All,
    Available,
    Unavailable,
}

impl Availability {
    fn accepts(self, book: &Book) -> bool {
        match self {
            Self::All => true,
            Self::Available => book.available,
            Self::Unavailable => !book.available,
        }
    }
}

impl FromStr for Availability {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(CatalogError::UnknownAvailability(other.to_string())),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        })
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    Relevance,
    /// Ascending by title.
    Title,
    /// Newest first.
    Year,
    /// Highest rated first.
    Rating,
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(Self::Relevance),
            "title" => Ok(Self::Title),
            "year" => Ok(Self::Year),
            "rating" => Ok(Self::Rating),
            other => Err(CatalogError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Relevance => "relevance",
            Self::Title => "title",
            Self::Year => "year",
            Self::Rating => "rating",
        })
    }
}

/// Everything that determines one displayed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogQuery {
    pub search_term: String,
    pub genre: String,
    pub author: String,
    pub year: String,
    pub availability: Availability,
    pub sort: SortKey,
    /// One-based page index, already clamped by the caller.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            genre: ALL.to_string(),
            author: ALL.to_string(),
            year: ALL.to_string(),
            availability: Availability::All,
            sort: SortKey::Relevance,
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Whether a record passes every filter of this query.
    pub fn matches(&self, book: &Book) -> bool {
        self.matches_search(book)
            && (self.genre == ALL || book.genre == self.genre)
            && (self.author == ALL || book.author == self.author)
            && (self.year == ALL || book.year.to_string() == self.year)
            && self.availability.accepts(book)
    }

    fn matches_search(&self, book: &Book) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
    }
}

/// A page ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage<'a> {
    pub displayed_books: Vec<&'a Book>,
    pub total_pages: usize,
    pub current_page: usize,
    pub result_count: usize,
}

/// Records that pass every filter, in catalog order.
pub fn filter_books<'a, I>(books: I, query: &CatalogQuery) -> Vec<&'a Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    books
        .into_iter()
        .filter(|book| query.matches(book))
        .collect()
}

/// Stable sort of a derived view.
pub fn sort_books(books: &mut [&Book], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::Title => books.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::Year => books.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::Rating => books.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

/// `ceil(match_count / page_size)`; zero when nothing matched.
pub fn total_pages(match_count: usize, page_size: NonZeroUsize) -> usize {
    match_count.div_ceil(page_size.get())
}

/// The one-based `page` of `matches`. Pages past the end come back empty.
pub fn paginate<'a>(matches: &[&'a Book], page: usize, page_size: NonZeroUsize) -> Vec<&'a Book> {
    let start = page.saturating_sub(1).saturating_mul(page_size.get());
    matches
        .iter()
        .skip(start)
        .take(page_size.get())
        .copied()
        .collect()
}

/// Filter, sort and slice in one pass.
pub fn run_query<'a>(books: &'a [Book], query: &CatalogQuery, page_size: NonZeroUsize) -> CatalogPage<'a> {
    let mut matches = filter_books(books, query);
    sort_books(&mut matches, query.sort);

    let result_count = matches.len();
    let total_pages = total_pages(result_count, page_size);
    let displayed_books = paginate(&matches, query.page, page_size);

    tracing::debug!(
        search = %query.search_term,
        sort = %query.sort,
        page = query.page,
        result_count,
        total_pages,
        "catalog query evaluated"
    );

    CatalogPage {
        displayed_books,
        total_pages,
        current_page: query.page,
        result_count,
    }
}
