//! Request-scoped unit of work

use uuid::Uuid;

use crate::domain::{Author, Book};

/// One staged mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    /// Insert a new author together with its books
    AddAuthor(Author),
    /// Remove an author and its books
    DeleteAuthor(Uuid),
    /// Append a book to an existing author
    AddBook(Book),
}

/// Mutations staged by one request, applied by
/// [`LibraryRepository::save`](super::LibraryRepository::save)
///
/// Owned by the request that builds it. Dropping it unsaved discards the
/// changes; nothing is shared with other requests.
///
/// # Example
///
/// ```rust
/// use library_api::repository::ChangeSet;
/// use uuid::Uuid;
///
/// let mut changes = ChangeSet::new();
/// assert!(changes.is_empty());
///
/// changes.delete_author_by_id(Uuid::nil());
/// assert_eq!(changes.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<StagedChange>,
}

impl ChangeSet {
    /// An empty unit of work
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a new author, including its books
    pub fn add_author(&mut self, author: Author) -> &mut Self {
        self.changes.push(StagedChange::AddAuthor(author));
        self
    }

    /// Stage removal of an author and its books
    pub fn delete_author(&mut self, author: &Author) -> &mut Self {
        self.delete_author_by_id(author.id)
    }

    /// Stage removal of an author by id
    pub fn delete_author_by_id(&mut self, id: Uuid) -> &mut Self {
        self.changes.push(StagedChange::DeleteAuthor(id));
        self
    }

    /// Stage a new book for an author; the book's owner is set to `author_id`
    pub fn add_book_for_author(&mut self, author_id: Uuid, mut book: Book) -> &mut Self {
        book.author_id = author_id;
        self.changes.push(StagedChange::AddBook(book));
        self
    }

    /// Staged changes, in staging order
    #[must_use]
    pub fn changes(&self) -> &[StagedChange] {
        &self.changes
    }

    /// Number of staged changes
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether nothing was staged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl IntoIterator for ChangeSet {
    type Item = StagedChange;
    type IntoIter = std::vec::IntoIter<StagedChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_book_sets_owner() {
        let owner = Uuid::new_v4();
        let book = Book {
            id: Uuid::new_v4(),
            title: "Solaris".to_string(),
            description: None,
            author_id: Uuid::nil(),
        };

        let mut changes = ChangeSet::new();
        changes.add_book_for_author(owner, book);

        match &changes.changes()[0] {
            StagedChange::AddBook(book) => assert_eq!(book.author_id, owner),
            other => panic!("unexpected change {:?}", other),
        }
    }

    #[test]
    fn test_changes_keep_staging_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let mut changes = ChangeSet::new();
        changes.delete_author_by_id(first).delete_author_by_id(second);

        let ids: Vec<Uuid> = changes
            .into_iter()
            .map(|change| match change {
                StagedChange::DeleteAuthor(id) => id,
                other => panic!("unexpected change {:?}", other),
            })
            .collect();
        assert_eq!(ids, [first, second]);
    }
}
