//! Repository trait for the author catalog
//!
//! Uses RPITIT (return position `impl Trait` in traits) for async methods
//! without `async_trait`.

use std::future::Future;

use uuid::Uuid;

use super::changes::ChangeSet;
use crate::domain::{Author, Book};
use crate::error::Result;
use crate::paging::{PagedList, ResourceParameters};

/// Access to stored authors and their books
///
/// Reads see only saved state. Writes are staged by each request in its own
/// [`ChangeSet`] and applied by [`save`](Self::save).
pub trait LibraryRepository: Send + Sync + 'static {
    /// One page of authors matching the parameters' genre and search filters
    ///
    /// The genre filter is an exact, case-insensitive match on the trimmed
    /// value. The search query is a case-insensitive substring match on
    /// genre, first name or last name. Results are ordered by the resolved
    /// `orderBy` clause before paging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSortKey`](crate::Error::InvalidSortKey) for an
    /// unmapped sort key.
    fn get_authors(
        &self,
        params: &ResourceParameters,
    ) -> impl Future<Output = Result<PagedList<Author>>> + Send;

    /// A single author with its books
    fn get_author(&self, id: Uuid) -> impl Future<Output = Result<Option<Author>>> + Send;

    /// Whether an author with this id is stored
    fn author_exists(&self, id: Uuid) -> impl Future<Output = Result<bool>> + Send;

    /// Books of one author, in insertion order
    fn get_books_for_author(
        &self,
        author_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Book>>> + Send;

    /// One book of one author
    fn get_book_for_author(
        &self,
        author_id: Uuid,
        book_id: Uuid,
    ) -> impl Future<Output = Result<Option<Book>>> + Send;

    /// Apply one request's staged changes all-or-nothing
    ///
    /// Returns `false` when the changes could not be persisted, in which case
    /// none of them are visible; callers surface that as a server fault. An
    /// empty change set saves trivially.
    fn save(&self, changes: ChangeSet) -> impl Future<Output = bool> + Send;
}
