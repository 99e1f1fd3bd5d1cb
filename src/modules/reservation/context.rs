use serde::Serialize;

use crate::modules::catalog::Book;

const DEFAULT_TITLE: &str = "Crime and Punishment";
const DEFAULT_AUTHOR: &str = "Fyodor Dostoevsky";
const DEFAULT_YEAR: &str = "1866";
const DEFAULT_ISBN: &str = "978-5-17-095423-1";

/// The book summary shown at the top of the reservation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookContext {
    pub title: String,
    pub author: String,
    pub year: String,
    pub isbn: String,
}

impl BookContext {
    /// Build from navigation parameters. Unknown keys are ignored; absent or
    /// empty values fall back to the house default title.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut context = Self::default();
        for (key, value) in params {
            let value: String = value.into();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "title" => context.title = value,
                "author" => context.author = value,
                "year" => context.year = value,
                "isbn" => context.isbn = value,
                _ => {}
            }
        }
        context
    }

    /// Navigation parameters that reproduce this context.
    pub fn to_params(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("title", self.title.as_str()),
            ("author", self.author.as_str()),
            ("year", self.year.as_str()),
            ("isbn", self.isbn.as_str()),
        ]
    }
}

impl Default for BookContext {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            year: DEFAULT_YEAR.to_string(),
            isbn: DEFAULT_ISBN.to_string(),
        }
    }
}

impl From<&Book> for BookContext {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.to_string(),
            isbn: book.isbn.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::{BookSource, StaticCatalog};

    #[test]
    fn missing_params_use_fallbacks() {
        let context = BookContext::from_params(Vec::<(String, String)>::new());
        assert_eq!(context.title, "Crime and Punishment");
        assert_eq!(context.author, "Fyodor Dostoevsky");
        assert_eq!(context.year, "1866");
        assert_eq!(context.isbn, "978-5-17-095423-1");
    }

    #[test]
    fn provided_params_win() {
        let context = BookContext::from_params([("title", "Anna Karenina"), ("year", ""), ("shelf", "B4")]);
        assert_eq!(context.title, "Anna Karenina");
        assert_eq!(context.year, "1866");
        assert_eq!(context.author, "Fyodor Dostoevsky");
    }

    #[test]
    fn params_round_trip_through_book() {
        let catalog = StaticCatalog::sample();
        let book = catalog.find(7).unwrap();
        let context = BookContext::from(book);
        let restored = BookContext::from_params(context.to_params());
        assert_eq!(restored, context);
        assert_eq!(restored.year, "1957");
    }
}
