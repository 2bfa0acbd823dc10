//! Startup registration of sort mapping tables and DTO conversions

use chrono::Local;
use uuid::Uuid;

use super::dto::{AuthorDto, AuthorForCreation, BookDto, BookForCreation};
use super::entities::{age_at, Author, Book};
use super::mapper::Mapper;
use crate::error::Result;
use crate::mapping::{PropertyMapping, PropertyMappingService, PropertyMappingTable};

/// Sort keys clients may use on authors, mapped to [`Author`] properties
///
/// `name` sorts by first then last name; `age` sorts by date of birth in the
/// opposite direction (older authors have earlier birth dates).
///
/// # Errors
///
/// Returns [`Error::Configuration`](crate::Error::Configuration) if the table
/// is malformed.
pub fn author_sort_mappings() -> Result<PropertyMappingTable> {
    PropertyMappingTable::builder()
        .map("Id", [PropertyMapping::new("Id")])
        .map("Genre", [PropertyMapping::new("Genre")])
        .map("Age", [PropertyMapping::reverted("DateOfBirth")])
        .map(
            "Name",
            [
                PropertyMapping::new("FirstName"),
                PropertyMapping::new("LastName"),
            ],
        )
        .map("FirstName", [PropertyMapping::new("FirstName")])
        .map("LastName", [PropertyMapping::new("LastName")])
        .build()
}

/// The process-wide sort mapping registry
///
/// # Errors
///
/// Returns [`Error::Configuration`](crate::Error::Configuration) if a table
/// is malformed.
pub fn property_mapping_service() -> Result<PropertyMappingService> {
    Ok(PropertyMappingService::new().register::<AuthorDto, Author>(author_sort_mappings()?))
}

/// The process-wide conversion registry
#[must_use]
pub fn mapper() -> Mapper {
    Mapper::new()
        .register(author_to_dto)
        .register(book_to_dto)
        .register(author_from_creation)
        .register(book_from_creation)
}

fn author_to_dto(author: &Author) -> AuthorDto {
    AuthorDto {
        id: author.id,
        first_name: author.first_name.clone(),
        last_name: author.last_name.clone(),
        name: format!("{} {}", author.first_name, author.last_name),
        age: age_at(
            author.date_of_birth,
            author.date_of_death,
            Local::now().date_naive(),
        ),
        genre: author.genre.clone(),
    }
}

fn book_to_dto(book: &Book) -> BookDto {
    BookDto {
        id: book.id,
        title: book.title.clone(),
        description: book.description.clone(),
        author_id: book.author_id,
    }
}

/// New author with fresh identifiers; nested books belong to it
fn author_from_creation(payload: &AuthorForCreation) -> Author {
    let id = Uuid::new_v4();
    Author {
        id,
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        date_of_birth: payload.date_of_birth,
        date_of_death: payload.date_of_death,
        genre: payload.genre.trim().to_string(),
        books: payload
            .books
            .iter()
            .map(|book| Book {
                author_id: id,
                ..book_from_creation(book)
            })
            .collect(),
    }
}

/// New book with a fresh identifier; the owner is assigned when it is added
fn book_from_creation(payload: &BookForCreation) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: payload.title.trim().to_string(),
        description: payload.description.clone(),
        author_id: Uuid::nil(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{OrderDirection, SortKey};
    use chrono::NaiveDate;

    fn payload() -> AuthorForCreation {
        AuthorForCreation {
            first_name: "Douglas".to_string(),
            last_name: "Adams".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1952, 3, 11).unwrap(),
            date_of_death: NaiveDate::from_ymd_opt(2001, 5, 11),
            genre: "Science fiction".to_string(),
            books: vec![BookForCreation {
                title: "Mostly Harmless".to_string(),
                description: Some("The fifth book".to_string()),
            }],
        }
    }

    #[test]
    fn test_creation_then_dto() {
        let mapper = mapper();
        let author: Author = mapper.map(&payload()).unwrap();
        assert_eq!(author.books.len(), 1);
        assert_eq!(author.books[0].author_id, author.id);
        assert_ne!(author.books[0].id, author.id);

        let dto: AuthorDto = mapper.map(&author).unwrap();
        assert_eq!(dto.id, author.id);
        assert_eq!(dto.name, "Douglas Adams");
        assert_eq!(dto.age, 49);
        assert_eq!(dto.genre, "Science fiction");
    }

    #[test]
    fn test_book_mappings() {
        let mapper = mapper();
        let book: Book = mapper.map(&payload().books[0]).unwrap();
        assert!(book.author_id.is_nil());

        let dto: BookDto = mapper.map(&book).unwrap();
        assert_eq!(dto.title, "Mostly Harmless");
        assert_eq!(dto.description.as_deref(), Some("The fifth book"));
    }

    #[test]
    fn test_unregistered_pair() {
        let mapper = mapper();
        let dto = AuthorDto {
            id: Uuid::nil(),
            first_name: String::new(),
            last_name: String::new(),
            name: String::new(),
            age: 0,
            genre: String::new(),
        };
        assert!(mapper.map::<AuthorDto, Author>(&dto).is_err());
    }

    #[test]
    fn test_author_sort_keys() {
        let service = property_mapping_service().unwrap();
        let table = service.get_mapping::<AuthorDto, Author>().unwrap();
        let mut keys: Vec<&str> = table.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, ["age", "firstname", "genre", "id", "lastname", "name"]);

        for key in table.keys() {
            for mapping in table.get(key).unwrap() {
                assert!(Author::is_sortable(mapping.source_property()));
            }
        }

        assert_eq!(
            service.resolve_sort::<AuthorDto, Author>("age").unwrap(),
            vec![SortKey {
                property: "DateOfBirth".to_string(),
                direction: OrderDirection::Descending,
            }]
        );
        assert!(service.is_valid_mapping::<AuthorDto, Author>("name desc, genre").unwrap());
        assert!(!service.is_valid_mapping::<AuthorDto, Author>("dateOfBirth").unwrap());
    }
}
