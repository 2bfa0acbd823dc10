//! Client-facing representations and creation payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::shaping::{FieldDescriptor, ResourceSchema, Shape};

/// Public view of an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// `"{first_name} {last_name}"`
    pub name: String,
    pub age: u32,
    pub genre: String,
}

static AUTHOR_SCHEMA: ResourceSchema<AuthorDto> = ResourceSchema::new(
    "AuthorDto",
    "id",
    &[
        FieldDescriptor::new("id", |a| Value::String(a.id.to_string())),
        FieldDescriptor::new("firstName", |a| Value::from(a.first_name.as_str())),
        FieldDescriptor::new("lastName", |a| Value::from(a.last_name.as_str())),
        FieldDescriptor::new("name", |a| Value::from(a.name.as_str())),
        FieldDescriptor::new("age", |a| Value::from(a.age)),
        FieldDescriptor::new("genre", |a| Value::from(a.genre.as_str())),
    ],
);

impl Shape for AuthorDto {
    fn schema() -> &'static ResourceSchema<Self> {
        &AUTHOR_SCHEMA
    }
}

/// Public view of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

static BOOK_SCHEMA: ResourceSchema<BookDto> = ResourceSchema::new(
    "BookDto",
    "id",
    &[
        FieldDescriptor::new("id", |b| Value::String(b.id.to_string())),
        FieldDescriptor::new("title", |b| Value::from(b.title.as_str())),
        FieldDescriptor::new("description", |b| Value::from(b.description.clone())),
        FieldDescriptor::new("authorId", |b| Value::String(b.author_id.to_string())),
    ],
);

impl Shape for BookDto {
    fn schema() -> &'static ResourceSchema<Self> {
        &BOOK_SCHEMA
    }
}

/// Payload for creating an author, optionally with books
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreation {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
    pub genre: String,
    #[serde(default)]
    pub books: Vec<BookForCreation>,
}

impl AuthorForCreation {
    /// Reject payloads that cannot become a stored author
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] for blank names or genre, a death date
    /// before the birth date, or an invalid nested book.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("genre", &self.genre),
        ] {
            if value.trim().is_empty() {
                return Err(Error::BadRequest(format!("{} must not be blank", field)));
            }
        }
        if self.date_of_death.is_some_and(|died| died < self.date_of_birth) {
            return Err(Error::BadRequest(
                "dateOfDeath must not precede dateOfBirth".to_string(),
            ));
        }
        self.books.iter().try_for_each(BookForCreation::validate)
    }
}

/// Payload for creating a book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForCreation {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl BookForCreation {
    /// Reject a book without a title
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] when the title is blank.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::BadRequest("title must not be blank".to_string()));
        }
        Ok(())
    }
}
