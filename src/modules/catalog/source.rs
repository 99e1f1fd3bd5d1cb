use super::models::Book;

/// Read-only provider of catalog records.
pub trait BookSource: Send + Sync {
    /// The whole collection, in catalog order.
    fn books(&self) -> &[Book];

    /// Look up a single record by identifier.
    fn find(&self, id: u32) -> Option<&Book> {
        self.books().iter().find(|book| book.id == id)
    }
}

impl BookSource for Vec<Book> {
    fn books(&self) -> &[Book] {
        self
    }
}

impl<T: BookSource + ?Sized> BookSource for std::sync::Arc<T> {
    fn books(&self) -> &[Book] {
        (**self).books()
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    books: Vec<Book>,
}

impl StaticCatalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// The eight-title sample collection shipped with the application.
    pub fn sample() -> Self {
        Self::new(vec![
            book(1, "Crime and Punishment", "Fyodor Dostoevsky", 1866, "Classics", true, 4.9, 671, "978-5-17-095423-1"),
            book(2, "War and Peace", "Leo Tolstoy", 1869, "Classics", false, 4.8, 1225, "978-5-17-091234-7"),
            book(3, "The Master and Margarita", "Mikhail Bulgakov", 1967, "Mysticism", true, 4.7, 480, "978-5-389-15678-2"),
            book(4, "Anna Karenina", "Leo Tolstoy", 1877, "Classics", true, 4.6, 864, "978-5-17-089542-3"),
            book(5, "Eugene Onegin", "Alexander Pushkin", 1833, "Poetry", true, 4.8, 224, "978-5-699-84523-1"),
            book(6, "The Idiot", "Fyodor Dostoevsky", 1869, "Classics", false, 4.7, 640, "978-5-17-088765-4"),
            book(7, "Doctor Zhivago", "Boris Pasternak", 1957, "Classics", true, 4.5, 592, "978-5-17-095234-8"),
            book(8, "The Brothers Karamazov", "Fyodor Dostoevsky", 1880, "Classics", true, 4.9, 840, "978-5-389-11234-5"),
        ])
    }
}

impl BookSource for StaticCatalog {
    fn books(&self) -> &[Book] {
        &self.books
    }
}

#[allow(clippy::too_many_arguments)]
fn book(
    id: u32,
    title: &str,
    author: &str,
    year: i32,
    genre: &str,
    available: bool,
    rating: f32,
    pages: u32,
    isbn: &str,
) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        year,
        genre: genre.to_string(),
        available,
        rating,
        pages,
        isbn: isbn.to_string(),
    }
}
