//! Entity, collection and root link construction

use axum::http::Method;
use url::Url;
use uuid::Uuid;

use super::link::LinkDto;
use crate::error::{Error, Result};
use crate::paging::ResourceParameters;

/// Which page of the author collection a URI should point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceUriType {
    /// `pageNumber - 1`
    PreviousPage,
    /// `pageNumber + 1`
    NextPage,
    /// The requested page
    Current,
}

/// Builds absolute links under a public base URL
///
/// # Example
///
/// ```rust
/// use library_api::hypermedia::LinkBuilder;
/// use uuid::Uuid;
///
/// let links = LinkBuilder::new("http://localhost:8080").unwrap();
/// let id = Uuid::nil();
/// let author_links = links.build_author_links(id, Some("firstName"));
///
/// assert_eq!(author_links[0].rel, "self");
/// assert!(author_links[0].href.ends_with("?fields=firstName"));
/// assert_eq!(author_links[1].method, "DELETE");
/// ```
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    /// Create a builder rooted at `base_url`
    ///
    /// Any query or fragment on the base URL is dropped; a path prefix is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `base_url` is not an absolute
    /// hierarchical URL such as `https://api.example.com`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url).map_err(|e| {
            Error::Configuration(format!("invalid hypermedia base_url '{}': {}", base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "hypermedia base_url '{}' cannot carry resource paths",
                base_url
            )));
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    /// Base URL links are rooted at
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base URLs, so the path is always editable
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URI of the API root document
    #[must_use]
    pub fn root_uri(&self) -> String {
        self.endpoint(&["api"]).into()
    }

    /// URI of the author collection, without parameters
    #[must_use]
    pub fn authors_uri(&self) -> String {
        self.endpoint(&["api", "authors"]).into()
    }

    /// URI of one author, optionally carrying a field selection
    #[must_use]
    pub fn author_uri(&self, id: Uuid, fields: Option<&str>) -> String {
        let mut url = self.endpoint(&["api", "authors", &id.to_string()]);
        if let Some(fields) = fields.filter(|f| !f.trim().is_empty()) {
            url.query_pairs_mut().append_pair("fields", fields);
        }
        url.into()
    }

    /// URI of an author's book collection
    #[must_use]
    pub fn books_uri(&self, author_id: Uuid) -> String {
        self.endpoint(&["api", "authors", &author_id.to_string(), "books"])
            .into()
    }

    /// URI of one book of an author
    #[must_use]
    pub fn book_uri(&self, author_id: Uuid, book_id: Uuid) -> String {
        self.endpoint(&[
            "api",
            "authors",
            &author_id.to_string(),
            "books",
            &book_id.to_string(),
        ])
        .into()
    }

    /// URI of a page of the author collection
    ///
    /// Carries `fields`, `orderBy`, `searchQuery`, `genre`, `pageNumber` and
    /// the clamped `pageSize`; absent optional parameters are left out. The
    /// previous page of page 1 is page 1.
    #[must_use]
    pub fn authors_resource_uri(&self, params: &ResourceParameters, kind: ResourceUriType) -> String {
        let page_number = match kind {
            ResourceUriType::PreviousPage => params.page_number().saturating_sub(1).max(1),
            ResourceUriType::NextPage => params.page_number().saturating_add(1),
            ResourceUriType::Current => params.page_number(),
        };

        let mut url = self.endpoint(&["api", "authors"]);
        {
            let mut query = url.query_pairs_mut();
            if let Some(fields) = params.fields() {
                query.append_pair("fields", fields);
            }
            query.append_pair("orderBy", &params.order_by);
            if let Some(search_query) = params.search_filter() {
                query.append_pair("searchQuery", search_query);
            }
            if let Some(genre) = params.genre_filter() {
                query.append_pair("genre", genre);
            }
            query.append_pair("pageNumber", &page_number.to_string());
            query.append_pair("pageSize", &params.page_size().to_string());
        }
        url.into()
    }

    /// Action links of one author, `self` first
    #[must_use]
    pub fn build_author_links(&self, id: Uuid, fields: Option<&str>) -> Vec<LinkDto> {
        let books = self.books_uri(id);
        vec![
            LinkDto::new(self.author_uri(id, fields), "self", Method::GET.as_str()),
            LinkDto::new(
                self.author_uri(id, None),
                "delete_author",
                Method::DELETE.as_str(),
            ),
            LinkDto::new(books.clone(), "create_book_for_author", Method::POST.as_str()),
            LinkDto::new(books, "books", Method::GET.as_str()),
        ]
    }

    /// Navigation links of an author collection page
    #[must_use]
    pub fn build_authors_links(
        &self,
        params: &ResourceParameters,
        has_next: bool,
        has_previous: bool,
    ) -> Vec<LinkDto> {
        let mut links = vec![LinkDto::new(
            self.authors_resource_uri(params, ResourceUriType::Current),
            "self",
            Method::GET.as_str(),
        )];

        if has_next {
            links.push(LinkDto::new(
                self.authors_resource_uri(params, ResourceUriType::NextPage),
                "nextPage",
                Method::GET.as_str(),
            ));
        }

        if has_previous {
            links.push(LinkDto::new(
                self.authors_resource_uri(params, ResourceUriType::PreviousPage),
                "previousPage",
                Method::GET.as_str(),
            ));
        }

        links
    }

    /// Entry points advertised by the API root document
    #[must_use]
    pub fn build_root_links(&self) -> Vec<LinkDto> {
        vec![
            LinkDto::new(self.root_uri(), "self", Method::GET.as_str()),
            LinkDto::new(self.authors_uri(), "authors", Method::GET.as_str()),
            LinkDto::new(self.authors_uri(), "create_author", Method::POST.as_str()),
        ]
    }
}
