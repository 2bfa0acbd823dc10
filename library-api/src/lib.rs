//! # library-api
//!
//! Hypermedia-aware REST API for a catalog of authors and books.
//!
//! ## Features
//!
//! - **Sort mapping**: client `orderBy` keys validated against per-resource
//!   mapping tables and expanded to storage properties
//! - **Data shaping**: `fields` projections built from static field tables,
//!   identifier always included
//! - **Paging**: clamped page sizes, paged result envelopes and an
//!   `X-Pagination` header with page links
//! - **Hypermedia**: entity, collection and root links, switched on by the
//!   `Accept` header
//! - **Graceful shutdown**: Proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use library_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     // Seeded in-memory catalog
//!     let state = AppState::in_memory(config.clone())?;
//!
//!     // Run server
//!     Server::new(config).serve(router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod hypermedia;
pub mod mapping;
pub mod negotiation;
pub mod observability;
pub mod paging;
pub mod repository;
pub mod server;
pub mod shaping;
pub mod state;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, HATEOAS_MEDIA_TYPE};
    pub use crate::domain::{Author, AuthorDto, AuthorForCreation, Book, BookDto, BookForCreation, Mapper};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::handlers::{router, PAGINATION_HEADER};
    pub use crate::hypermedia::{LinkBuilder, LinkDto, ResourceUriType};
    pub use crate::mapping::{PropertyMapping, PropertyMappingService, PropertyMappingTable};
    pub use crate::negotiation::{negotiate_authors, NegotiatedCollection, ResponseMode};
    pub use crate::observability::init_tracing;
    pub use crate::paging::{PagedList, PaginationMetadata, ResourceParameters};
    pub use crate::repository::{ChangeSet, InMemoryLibraryRepository, LibraryRepository, StagedChange};
    pub use crate::server::Server;
    pub use crate::shaping::{shape, shape_many, type_has_properties, Shape, ShapedEntity};
    pub use crate::state::AppState;

    pub use axum::{
        extract::{Path, Query, State},
        response::{IntoResponse, Response},
        routing::{delete, get, post},
        Json, Router,
    };
}
