//! Book endpoints nested under an author

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::{response::Created, FieldsQuery};
use crate::{
    domain::{Book, BookDto, BookForCreation},
    error::{Error, Result},
    repository::{ChangeSet, LibraryRepository},
    shaping::{shape, shape_many, validate_fields, ShapedEntity},
    state::AppState,
};

async fn ensure_author<R: LibraryRepository>(state: &AppState<R>, author_id: Uuid) -> Result<()> {
    if state.repository().author_exists(author_id).await? {
        Ok(())
    } else {
        Err(Error::NotFound(format!("Author {} not found", author_id)))
    }
}

/// `GET /api/authors/{id}/books`
pub async fn list_books<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Vec<ShapedEntity>>> {
    validate_fields::<BookDto>(query.fields.as_deref())?;
    ensure_author(&state, author_id).await?;

    let books = state.repository().get_books_for_author(author_id).await?;
    let books: Vec<BookDto> = state.mapper().map_many(&books)?;
    Ok(Json(shape_many(&books, query.fields())?))
}

/// `GET /api/authors/{id}/books/{book_id}`
pub async fn get_book<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    Path((author_id, book_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<ShapedEntity>> {
    validate_fields::<BookDto>(query.fields.as_deref())?;
    ensure_author(&state, author_id).await?;

    let book = state
        .repository()
        .get_book_for_author(author_id, book_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Book {} not found", book_id)))?;
    let dto: BookDto = state.mapper().map(&book)?;
    Ok(Json(shape(&dto, query.fields())?))
}

/// `POST /api/authors/{id}/books`
pub async fn create_book<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    Path(author_id): Path<Uuid>,
    Json(payload): Json<BookForCreation>,
) -> Result<Created<ShapedEntity>> {
    payload.validate()?;
    ensure_author(&state, author_id).await?;

    let mut book: Book = state.mapper().map(&payload)?;
    book.author_id = author_id;
    let id = book.id;
    let dto: BookDto = state.mapper().map(&book)?;

    let mut changes = ChangeSet::new();
    changes.add_book_for_author(author_id, book);
    if !state.repository().save(changes).await {
        return Err(Error::Persistence(format!(
            "Creating a book for author {} failed on save",
            author_id
        )));
    }

    tracing::info!(author_id = %author_id, book_id = %id, "Book created");
    Ok(Created::new(
        state.links().book_uri(author_id, id),
        shape(&dto, None)?,
    ))
}
