//! Choice between plain and hypermedia collection responses
//!
//! The negotiator only decides and assembles; serialization and the
//! `X-Pagination` header are the HTTP layer's job.

use axum::http::{header::ACCEPT, HeaderMap};
use serde::Serialize;

use crate::domain::AuthorDto;
use crate::error::Result;
use crate::hypermedia::{LinkBuilder, LinkDto, ResourceUriType};
use crate::paging::{PagedList, PaginationMetadata, ResourceParameters};
use crate::shaping::{shape_many, ShapedEntity};

/// Response shape requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Shaped values only
    #[default]
    Plain,
    /// Shaped values with embedded links
    Linked,
}

impl ResponseMode {
    /// Pick a mode from an `Accept` header value
    ///
    /// Linked iff one of the comma-separated media ranges, with parameters
    /// removed, equals `hypermedia_media_type` ignoring case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use library_api::negotiation::ResponseMode;
    ///
    /// let hateoas = "application/vnd.marvin.hateoas+json";
    /// assert_eq!(
    ///     ResponseMode::from_accept(Some("text/html, application/vnd.marvin.hateoas+json;q=0.9"), hateoas),
    ///     ResponseMode::Linked
    /// );
    /// assert_eq!(ResponseMode::from_accept(Some("application/json"), hateoas), ResponseMode::Plain);
    /// assert_eq!(ResponseMode::from_accept(None, hateoas), ResponseMode::Plain);
    /// ```
    #[must_use]
    pub fn from_accept(accept: Option<&str>, hypermedia_media_type: &str) -> Self {
        let wanted = hypermedia_media_type.trim();
        let linked = accept.is_some_and(|accept| {
            accept.split(',').any(|range| {
                range
                    .split(';')
                    .next()
                    .is_some_and(|media| media.trim().eq_ignore_ascii_case(wanted))
            })
        });

        if linked {
            Self::Linked
        } else {
            Self::Plain
        }
    }

    /// Pick a mode from every `Accept` header of a request
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, hypermedia_media_type: &str) -> Self {
        let linked = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| Self::from_accept(Some(value), hypermedia_media_type).is_linked());

        if linked {
            Self::Linked
        } else {
            Self::Plain
        }
    }

    /// Whether links should be embedded
    #[must_use]
    pub const fn is_linked(self) -> bool {
        matches!(self, Self::Linked)
    }
}

/// Whether a request's `Accept` headers admit one of the produced media types
///
/// True when no `Accept` header is present or all are blank, or when some
/// range (parameters removed, case ignored) is `*/*`, `application/*`,
/// `application/json` or `hypermedia_media_type`.
///
/// # Example
///
/// ```rust
/// use axum::http::{header::ACCEPT, HeaderMap, HeaderValue};
/// use library_api::negotiation::is_acceptable;
///
/// let hateoas = "application/vnd.marvin.hateoas+json";
/// let mut headers = HeaderMap::new();
/// assert!(is_acceptable(&headers, hateoas));
///
/// headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
/// assert!(!is_acceptable(&headers, hateoas));
///
/// headers.insert(ACCEPT, HeaderValue::from_static("text/html, application/json;q=0.5"));
/// assert!(is_acceptable(&headers, hateoas));
/// ```
#[must_use]
pub fn is_acceptable(headers: &HeaderMap, hypermedia_media_type: &str) -> bool {
    let wanted = hypermedia_media_type.trim();
    let mut ranges = headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|range| range.split(';').next())
        .map(str::trim)
        .filter(|media| !media.is_empty())
        .peekable();

    if ranges.peek().is_none() {
        return true;
    }

    ranges.any(|media| {
        ["*/*", "application/*", "application/json", wanted]
            .iter()
            .any(|produced| media.eq_ignore_ascii_case(produced))
    })
}

/// Body of a hypermedia collection response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedCollection {
    /// Shaped items, each carrying its own links
    pub value: Vec<ShapedEntity>,
    /// Collection navigation links
    pub links: Vec<LinkDto>,
}

/// A collection response in one of the two negotiated shapes
#[derive(Debug, Clone, PartialEq)]
pub enum NegotiatedCollection {
    /// Bare array of shaped items
    Plain {
        value: Vec<ShapedEntity>,
        pagination: PaginationMetadata,
    },
    /// `{ value, links }` with per-item links
    Linked {
        body: LinkedCollection,
        pagination: PaginationMetadata,
    },
}

impl NegotiatedCollection {
    /// Pagination summary for the `X-Pagination` header
    #[must_use]
    pub fn pagination(&self) -> &PaginationMetadata {
        match self {
            Self::Plain { pagination, .. } | Self::Linked { pagination, .. } => pagination,
        }
    }

    /// Shape this response was built in
    #[must_use]
    pub fn mode(&self) -> ResponseMode {
        match self {
            Self::Plain { .. } => ResponseMode::Plain,
            Self::Linked { .. } => ResponseMode::Linked,
        }
    }

    /// Shaped items, in page order
    #[must_use]
    pub fn items(&self) -> &[ShapedEntity] {
        match self {
            Self::Plain { value, .. } => value,
            Self::Linked { body, .. } => &body.value,
        }
    }
}

/// Assemble the author collection response for a negotiated mode
///
/// `params` must already have passed sort and field validation. Both modes
/// carry previous/next page URIs in the pagination summary; linked mode also
/// embeds collection links and per-author links.
///
/// # Errors
///
/// Returns [`Error::UnknownField`](crate::Error::UnknownField) if the field
/// selection was not validated beforehand.
pub fn negotiate_authors(
    mode: ResponseMode,
    params: &ResourceParameters,
    authors: &PagedList<AuthorDto>,
    links: &LinkBuilder,
) -> Result<NegotiatedCollection> {
    let fields = params.fields();
    let shaped = shape_many(authors.items(), fields)?;

    let previous = authors
        .has_previous()
        .then(|| links.authors_resource_uri(params, ResourceUriType::PreviousPage));
    let next = authors
        .has_next()
        .then(|| links.authors_resource_uri(params, ResourceUriType::NextPage));
    let pagination = authors.metadata().with_page_links(previous, next);

    Ok(match mode {
        ResponseMode::Plain => NegotiatedCollection::Plain {
            value: shaped,
            pagination,
        },
        ResponseMode::Linked => {
            let value = shaped
                .into_iter()
                .zip(authors.items())
                .map(|(entity, author)| entity.with_links(links.build_author_links(author.id, fields)))
                .collect();
            NegotiatedCollection::Linked {
                body: LinkedCollection {
                    value,
                    links: links.build_authors_links(params, authors.has_next(), authors.has_previous()),
                },
                pagination,
            }
        }
    })
}
