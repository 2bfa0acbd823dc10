//! In-memory repository with all-or-nothing saves

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::changes::{ChangeSet, StagedChange};
use super::traits::LibraryRepository;
use crate::domain::{Author, AuthorDto, Book};
use crate::error::{Error, Result};
use crate::mapping::{OrderDirection, PropertyMappingService, SortKey};
use crate::paging::{PagedList, ResourceParameters};

/// Author catalog kept in process memory
///
/// Authors are keyed by id; books live inside their author. The only shared
/// state is the saved catalog; staged changes arrive with each `save`.
#[derive(Debug)]
pub struct InMemoryLibraryRepository {
    authors: RwLock<BTreeMap<Uuid, Author>>,
    mappings: Arc<PropertyMappingService>,
}

impl InMemoryLibraryRepository {
    /// Empty repository sorting with `mappings`
    #[must_use]
    pub fn new(mappings: Arc<PropertyMappingService>) -> Self {
        Self {
            authors: RwLock::new(BTreeMap::new()),
            mappings,
        }
    }

    /// Repository pre-populated with already saved authors
    #[must_use]
    pub fn with_authors(
        mappings: Arc<PropertyMappingService>,
        authors: impl IntoIterator<Item = Author>,
    ) -> Self {
        let stored = authors
            .into_iter()
            .map(|author| (author.id, author))
            .collect();
        Self {
            authors: RwLock::new(stored),
            mappings,
        }
    }

    /// Number of saved authors
    pub async fn len(&self) -> usize {
        self.authors.read().await.len()
    }

    /// Whether no author is saved
    pub async fn is_empty(&self) -> bool {
        self.authors.read().await.is_empty()
    }

    fn sort_keys(&self, order_by: &str) -> Result<Vec<SortKey>> {
        let keys = self.mappings.resolve_sort::<AuthorDto, Author>(order_by)?;
        if let Some(key) = keys.iter().find(|key| !Author::is_sortable(&key.property)) {
            return Err(Error::Configuration(format!(
                "authors cannot be sorted on property '{}'",
                key.property
            )));
        }
        Ok(keys)
    }
}

fn compare_authors(a: &Author, b: &Author, keys: &[SortKey]) -> Ordering {
    keys.iter()
        .map(|key| {
            let ordering = a
                .compare_property(b, &key.property)
                .unwrap_or(Ordering::Equal);
            match key.direction {
                OrderDirection::Ascending => ordering,
                OrderDirection::Descending => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn apply(store: &mut BTreeMap<Uuid, Author>, change: StagedChange) -> std::result::Result<(), String> {
    match change {
        StagedChange::AddAuthor(author) => {
            if store.contains_key(&author.id) {
                return Err(format!("author {} already exists", author.id));
            }
            store.insert(author.id, author);
        }
        StagedChange::DeleteAuthor(id) => {
            if store.remove(&id).is_none() {
                return Err(format!("author {} does not exist", id));
            }
        }
        StagedChange::AddBook(book) => {
            let author = store
                .get_mut(&book.author_id)
                .ok_or_else(|| format!("author {} does not exist", book.author_id))?;
            if author.books.iter().any(|existing| existing.id == book.id) {
                return Err(format!("book {} already exists", book.id));
            }
            author.books.push(book);
        }
    }
    Ok(())
}

impl LibraryRepository for InMemoryLibraryRepository {
    async fn get_authors(&self, params: &ResourceParameters) -> Result<PagedList<Author>> {
        let keys = self.sort_keys(&params.order_by)?;
        let genre = params.genre_filter();
        let search = params.search_filter();

        let authors = self.authors.read().await;
        let mut matches: Vec<&Author> = authors
            .values()
            .filter(|author| genre.map_or(true, |genre| author.has_genre(genre)))
            .filter(|author| search.map_or(true, |query| author.matches_search(query)))
            .collect();
        matches.sort_by(|a, b| compare_authors(a, b, &keys));

        tracing::debug!(
            matched = matches.len(),
            page = params.page_number(),
            page_size = params.page_size(),
            "Fetched authors"
        );

        Ok(PagedList::create(matches, params.page_number(), params.page_size()).map(Author::clone))
    }

    async fn get_author(&self, id: Uuid) -> Result<Option<Author>> {
        Ok(self.authors.read().await.get(&id).cloned())
    }

    async fn author_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.authors.read().await.contains_key(&id))
    }

    async fn get_books_for_author(&self, author_id: Uuid) -> Result<Vec<Book>> {
        Ok(self
            .authors
            .read()
            .await
            .get(&author_id)
            .map(|author| author.books.clone())
            .unwrap_or_default())
    }

    async fn get_book_for_author(&self, author_id: Uuid, book_id: Uuid) -> Result<Option<Book>> {
        Ok(self.authors.read().await.get(&author_id).and_then(|author| {
            author
                .books
                .iter()
                .find(|book| book.id == book_id)
                .cloned()
        }))
    }

    async fn save(&self, changes: ChangeSet) -> bool {
        if changes.is_empty() {
            return true;
        }

        let mut authors = self.authors.write().await;
        let mut staged = authors.clone();
        let count = changes.len();

        for change in changes {
            if let Err(reason) = apply(&mut staged, change) {
                tracing::warn!(reason = %reason, "Discarding staged changes");
                return false;
            }
        }

        *authors = staged;
        tracing::debug!(changes = count, "Saved staged changes");
        true
    }
}
