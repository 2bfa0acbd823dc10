//! Hypermedia link synthesis
//!
//! [`LinkBuilder`] turns resource identifiers and collection parameters into
//! absolute [`LinkDto`]s rooted at the configured public base URL. Page links
//! reproduce every collection parameter so that paging keeps the client's
//! filter, sort and field selection.

mod builder;
mod link;

pub use builder::{LinkBuilder, ResourceUriType};
pub use link::LinkDto;
