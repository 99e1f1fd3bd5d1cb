use serde::Serialize;

use super::models::Book;
use super::query::ALL;

/// Option lists for the genre, author and year selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub genres: Vec<String>,
    pub authors: Vec<String>,
    pub years: Vec<String>,
}

impl Facets {
    /// Each list starts with the `all` sentinel, followed by distinct values
    /// in the order they first appear.
    pub fn collect(books: &[Book]) -> Self {
        Self {
            genres: distinct(books.iter().map(|b| b.genre.clone())),
            authors: distinct(books.iter().map(|b| b.author.clone())),
            years: distinct(books.iter().map(|b| b.year.to_string())),
        }
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out = vec![ALL.to_string()];
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::source::{BookSource, StaticCatalog};

    #[test]
    fn lists_start_with_sentinel_in_first_seen_order() {
        let facets = Facets::collect(StaticCatalog::sample().books());
        assert_eq!(facets.genres, vec!["all", "Classics", "Mysticism", "Poetry"]);
        assert_eq!(
            facets.authors,
            vec![
                "all",
                "Fyodor Dostoevsky",
                "Leo Tolstoy",
                "Mikhail Bulgakov",
                "Alexander Pushkin",
                "Boris Pasternak"
            ]
        );
        assert_eq!(
            facets.years,
            vec!["all", "1866", "1869", "1967", "1877", "1833", "1957", "1880"]
        );
    }

    #[test]
    fn empty_collection_only_offers_sentinel() {
        let facets = Facets::collect(&[]);
        assert_eq!(facets.genres, vec!["all"]);
        assert_eq!(facets.years, vec!["all"]);
    }
}
