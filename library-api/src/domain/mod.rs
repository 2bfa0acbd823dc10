//! Authors and books: storage entities, public DTOs and the mappings between them
//!
//! Entities are what the repository stores. DTOs are what clients see and are
//! the types the shaper projects. [`Mapper`] holds the entity → DTO (and
//! creation payload → entity) conversions, and [`profiles`] registers them
//! together with the sort mapping tables at startup.

mod dto;
mod entities;
mod mapper;
pub mod profiles;

pub use dto::{AuthorDto, AuthorForCreation, BookDto, BookForCreation};
pub use entities::{age_at, Author, Book};
pub use mapper::Mapper;
