//! Owner of the catalog screen's query state.

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

use serde::Serialize;

use super::error::CatalogError;
use super::facets::Facets;
use super::query::{self, filter_books, run_query, Availability, CatalogPage, CatalogQuery, SortKey};
use super::source::BookSource;

/// Pagination controls derived from the current result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerState {
    /// Controls are only shown when there is more than one page.
    pub visible: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub pages: RangeInclusive<usize>,
}

/// Holds the query for one catalog view and keeps its page index valid.
///
/// Changing the search term or any filter resets to the first page. Changing
/// the sort key keeps the current page, since the match count is unchanged.
#[derive(Debug)]
pub struct CatalogView<S> {
    source: S,
    query: CatalogQuery,
    page_size: NonZeroUsize,
}

impl<S: BookSource> CatalogView<S> {
    pub fn new(source: S, page_size: usize) -> Result<Self, CatalogError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(CatalogError::ZeroPageSize)?;
        Ok(Self {
            source,
            query: CatalogQuery::default(),
            page_size,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.reset_page();
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.query.genre = genre.into();
        self.reset_page();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.query.author = author.into();
        self.reset_page();
    }

    pub fn set_year(&mut self, year: impl Into<String>) {
        self.query.year = year.into();
        self.reset_page();
    }

    pub fn set_availability(&mut self, availability: Availability) {
        self.query.availability = availability;
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    /// Number of pages for the current filters.
    pub fn total_pages(&self) -> usize {
        let matches = filter_books(self.source.books(), &self.query);
        query::total_pages(matches.len(), self.page_size)
    }

    /// Jump to `page`, clamped to `[1, max(total_pages, 1)]`.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let last = self.total_pages().max(1);
        self.query.page = page.clamp(1, last);
        self.query.page
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.query.page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.query.page.saturating_add(1))
    }

    /// Evaluate the current query.
    pub fn page(&self) -> CatalogPage<'_> {
        run_query(self.source.books(), &self.query, self.page_size)
    }

    pub fn pager(&self) -> PagerState {
        let total = self.total_pages();
        let current = self.query.page;
        PagerState {
            visible: total > 1,
            can_go_back: current > 1,
            can_go_forward: current < total,
            pages: 1..=total,
        }
    }

    pub fn facets(&self) -> Facets {
        Facets::collect(self.source.books())
    }

    fn reset_page(&mut self) {
        if self.query.page != 1 {
            tracing::debug!(from = self.query.page, "filters changed, returning to first page");
        }
        self.query.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::source::StaticCatalog;

    fn view() -> CatalogView<StaticCatalog> {
        CatalogView::new(StaticCatalog::sample(), 6).unwrap()
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = CatalogView::new(StaticCatalog::sample(), 0).unwrap_err();
        assert_eq!(err, CatalogError::ZeroPageSize);
    }

    #[test]
    fn pages_are_clamped() {
        let mut view = view();
        assert_eq!(view.go_to_page(0), 1);
        assert_eq!(view.go_to_page(5), 2);
        assert_eq!(view.next_page(), 2);
        assert_eq!(view.previous_page(), 1);
        assert_eq!(view.previous_page(), 1);
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let mut view = view();
        view.go_to_page(2);
        view.set_availability(Availability::Unavailable);
        assert_eq!(view.query().page, 1);

        let page = view.page();
        assert_eq!(page.result_count, 2);
        assert_eq!(page.displayed_books.len(), 2);
    }

    #[test]
    fn sort_change_keeps_page() {
        let mut view = view();
        view.go_to_page(2);
        view.set_sort(SortKey::Year);
        assert_eq!(view.query().page, 2);

        let years: Vec<i32> = view.page().displayed_books.iter().map(|b| b.year).collect();
        assert_eq!(years, vec![1866, 1833]);
    }

    #[test]
    fn pager_hidden_for_single_page() {
        let mut view = view();
        let pager = view.pager();
        assert!(pager.visible);
        assert!(!pager.can_go_back);
        assert!(pager.can_go_forward);
        assert_eq!(pager.pages, 1..=2);

        view.set_search_term("dostoevsky");
        let pager = view.pager();
        assert!(!pager.visible);
        assert!(!pager.can_go_forward);
    }

    #[test]
    fn empty_result_stays_on_page_one() {
        let mut view = view();
        view.set_search_term("tolkien");
        assert_eq!(view.next_page(), 1);
        let page = view.page();
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
        assert!(view.pager().pages.is_empty());
    }
}
