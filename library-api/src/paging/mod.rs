//! Collection query inputs and paged result envelopes
//!
//! [`ResourceParameters`] carries the paging, filter, search, sort and field
//! selection inputs of one collection request. [`PagedList`] wraps the page
//! a repository returns, and [`PaginationMetadata`] is the out-of-band summary
//! sent in the `X-Pagination` response header.
//!
//! # Example
//!
//! ```rust
//! use library_api::paging::{PagedList, ResourceParameters};
//!
//! let params = ResourceParameters::new().with_page_number(2).with_page_size(50);
//! assert_eq!(params.page_size(), 20); // clamped
//!
//! let page = PagedList::create(1..=45, params.page_number(), params.page_size());
//! assert_eq!(page.items(), &(21..=40).collect::<Vec<_>>()[..]);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.has_next() && page.has_previous());
//! ```

mod paged_list;
mod parameters;

pub use paged_list::{PagedList, PaginationMetadata};
pub use parameters::{ResourceParameters, DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
