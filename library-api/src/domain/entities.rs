//! Stored authors and books

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

/// An author as stored by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
    pub genre: String,
    pub books: Vec<Book>,
}

impl Author {
    /// Compare two authors on one storage property
    ///
    /// Property names are the storage-side names used by the sort mapping
    /// tables (`Id`, `FirstName`, `LastName`, `DateOfBirth`, `Genre`), matched
    /// case-insensitively. Text compares ignoring ASCII case. Returns `None`
    /// for a property authors cannot be sorted on.
    #[must_use]
    pub fn compare_property(&self, other: &Self, property: &str) -> Option<Ordering> {
        let ordering = match property.to_ascii_lowercase().as_str() {
            "id" => self.id.cmp(&other.id),
            "firstname" => compare_text(&self.first_name, &other.first_name),
            "lastname" => compare_text(&self.last_name, &other.last_name),
            "dateofbirth" => self.date_of_birth.cmp(&other.date_of_birth),
            "genre" => compare_text(&self.genre, &other.genre),
            _ => return None,
        };
        Some(ordering)
    }

    /// Whether a property name is accepted by [`compare_property`](Self::compare_property)
    #[must_use]
    pub fn is_sortable(property: &str) -> bool {
        matches!(
            property.to_ascii_lowercase().as_str(),
            "id" | "firstname" | "lastname" | "dateofbirth" | "genre"
        )
    }

    /// Whether this author matches a genre filter exactly, ignoring case
    #[must_use]
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.trim().eq_ignore_ascii_case(genre.trim())
    }

    /// Whether genre, first name or last name contains `query`, ignoring case
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        [&self.genre, &self.first_name, &self.last_name]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// A book as stored by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

/// Full years lived from `date_of_birth` to the date of death, or to `today`
///
/// A birth date after the end date yields 0.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use library_api::domain::age_at;
///
/// let born = NaiveDate::from_ymd_opt(1947, 9, 21).unwrap();
/// let today = NaiveDate::from_ymd_opt(2020, 9, 20).unwrap();
/// assert_eq!(age_at(born, None, today), 72);
/// ```
#[must_use]
pub fn age_at(date_of_birth: NaiveDate, date_of_death: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let end = date_of_death.unwrap_or(today);
    if end < date_of_birth {
        return 0;
    }

    let mut years = end.year() - date_of_birth.year();
    if (end.month(), end.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}
