use serde::{Deserialize, Serialize};

/// A catalog entry. Records are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: u32,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Year of first publication
    pub year: i32,
    /// Genre shown in the genre selector
    pub genre: String,
    /// Whether a copy is on the shelf
    pub available: bool,
    /// Reader rating between 0 and 5
    pub rating: f32,
    /// Page count
    pub pages: u32,
    /// ISBN as printed; the checksum is not validated
    pub isbn: String,
}

impl Book {
    /// Shelf status label shown on the catalog card.
    pub fn availability_label(&self) -> &'static str {
        if self.available {
            "Available"
        } else {
            "Checked out"
        }
    }
}
