//! Paged result envelope and its header summary

use serde::{Deserialize, Serialize};

/// One page of a larger result set
///
/// Built once per query and immutable afterwards. Holds at most `page_size`
/// items; the derived counters follow from `total_count`, `page_size` and
/// `current_page`.
///
/// # Example
///
/// ```rust
/// use library_api::paging::PagedList;
///
/// let page = PagedList::new(vec!["a", "b"], 25, 3, 10);
/// assert_eq!(page.total_pages(), 3);
/// assert!(!page.has_next());
/// assert!(page.has_previous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
    total_count: u64,
    page_size: u32,
    current_page: u32,
}

impl<T> PagedList<T> {
    /// Wrap an already fetched page
    ///
    /// `current_page` and `page_size` are raised to at least 1, and `items` is
    /// truncated to `page_size`.
    #[must_use]
    pub fn new(mut items: Vec<T>, total_count: u64, current_page: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        items.truncate(page_size as usize);
        Self {
            items,
            total_count,
            page_size,
            current_page: current_page.max(1),
        }
    }

    /// Cut one page out of a full, already ordered source
    #[must_use]
    pub fn create(source: impl IntoIterator<Item = T>, page_number: u32, page_size: u32) -> Self {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        let skip = (page_number as usize - 1).saturating_mul(page_size as usize);

        let mut items = Vec::with_capacity(page_size as usize);
        let mut total_count = 0u64;
        for (index, item) in source.into_iter().enumerate() {
            total_count += 1;
            if index >= skip && items.len() < page_size as usize {
                items.push(item);
            }
        }

        Self {
            items,
            total_count,
            page_size,
            current_page: page_number,
        }
    }

    /// Items of this page, in order
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the envelope, keeping the items
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Size of the whole result set
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Requested page size
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page number of this page (1-indexed)
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Number of pages in the result set, rounding up
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let page_size = u64::from(self.page_size);
        let pages = self.total_count.div_ceil(page_size);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether a page precedes this one
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page follows this one
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Number of items on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the items, keeping the paging counters
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
        }
    }

    /// Fallible [`map`](Self::map)
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PagedList<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(PagedList {
            items: self.items.into_iter().map(f).collect::<Result<_, E>>()?,
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
        })
    }

    /// Header summary of this page, without page links
    #[must_use]
    pub fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages(),
            previous_page_link: None,
            next_page_link: None,
        }
    }
}

/// Pagination summary sent in the `X-Pagination` header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Size of the whole result set
    pub total_count: u64,
    /// Requested page size
    pub page_size: u32,
    /// Page number of the returned page
    pub current_page: u32,
    /// Number of pages in the result set
    pub total_pages: u32,
    /// URI of the previous page, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_link: Option<String>,
    /// URI of the next page, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    /// Attach the previous/next page URIs
    #[must_use]
    pub fn with_page_links(mut self, previous: Option<String>, next: Option<String>) -> Self {
        self.previous_page_link = previous;
        self.next_page_link = next;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = PagedList::new(vec![0; 10], 25, 2, 10);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_first_page() {
        let page = PagedList::new(vec![0; 10], 25, 1, 10);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page() {
        let page = PagedList::new(vec![0; 5], 25, 3, 10);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_empty_result_set() {
        let page: PagedList<u8> = PagedList::create(Vec::new(), 1, 10);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert!(page.is_empty());
    }

    #[test]
    fn test_items_never_exceed_page_size() {
        let page = PagedList::new((0..15).collect(), 15, 1, 10);
        assert_eq!(page.len(), 10);
    }

    #[test]
    fn test_create_counts_whole_source() {
        let page = PagedList::create(0..23, 3, 10);
        assert_eq!(page.items(), &[20, 21, 22]);
        assert_eq!(page.total_count(), 23);
        assert_eq!(page.current_page(), 3);

        let beyond = PagedList::create(0..23, 9, 10);
        assert!(beyond.is_empty());
        assert_eq!(beyond.total_count(), 23);
        assert!(!beyond.has_next());
    }

    #[test]
    fn test_map_keeps_counters() {
        let page = PagedList::new(vec![1, 2], 12, 2, 2).map(|n| n * 10);
        assert_eq!(page.items(), &[10, 20]);
        assert_eq!(page.total_count(), 12);
        assert_eq!(page.total_pages(), 6);

        let failed: Result<PagedList<u8>, &str> =
            PagedList::new(vec![1, 2], 2, 1, 2).try_map(|_| Err("boom"));
        assert_eq!(failed.unwrap_err(), "boom");
    }

    #[test]
    fn test_metadata_serialization_omits_missing_links() {
        let metadata = PagedList::new(vec![0; 10], 25, 1, 10).metadata();
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalCount": 25,
                "pageSize": 10,
                "currentPage": 1,
                "totalPages": 3
            })
        );

        let linked = metadata.with_page_links(None, Some("http://x/api/authors?pageNumber=2".into()));
        let json = serde_json::to_value(&linked).unwrap();
        assert_eq!(json["nextPageLink"], "http://x/api/authors?pageNumber=2");
        assert!(json.get("previousPageLink").is_none());
    }
}
