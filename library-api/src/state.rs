//! Application state shared across handlers

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::{
    config::Config,
    domain::{profiles, Author, AuthorDto, AuthorForCreation, Book, BookDto, BookForCreation, Mapper},
    error::Result,
    hypermedia::LinkBuilder,
    mapping::PropertyMappingService,
    negotiation::ResponseMode,
    repository::{seed_authors, InMemoryLibraryRepository, LibraryRepository},
};

/// Process-wide, read-only collaborators plus the repository
///
/// Everything is behind an `Arc`, so cloning per request is cheap.
pub struct AppState<R> {
    config: Arc<Config>,
    repository: Arc<R>,
    mappings: Arc<PropertyMappingService>,
    mapper: Arc<Mapper>,
    links: Arc<LinkBuilder>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            repository: Arc::clone(&self.repository),
            mappings: Arc::clone(&self.mappings),
            mapper: Arc::clone(&self.mapper),
            links: Arc::clone(&self.links),
        }
    }
}

impl<R: LibraryRepository> AppState<R> {
    /// Assemble the state, checking the registries the handlers rely on
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) for an
    /// unusable hypermedia base URL and
    /// [`Error::MissingMapping`](crate::Error::MissingMapping) if the author
    /// sort table or a DTO conversion is not registered.
    pub fn new(
        config: Config,
        repository: R,
        mappings: Arc<PropertyMappingService>,
        mapper: Mapper,
    ) -> Result<Self> {
        let links = LinkBuilder::new(&config.hypermedia.base_url)?;
        mappings.get_mapping::<AuthorDto, Author>()?;
        mapper.ensure::<Author, AuthorDto>()?;
        mapper.ensure::<Book, BookDto>()?;
        mapper.ensure::<AuthorForCreation, Author>()?;
        mapper.ensure::<BookForCreation, Book>()?;

        Ok(Self {
            config: Arc::new(config),
            repository: Arc::new(repository),
            mappings,
            mapper: Arc::new(mapper),
            links: Arc::new(links),
        })
    }

    /// Loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Storage collaborator
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Sort mapping registry
    pub fn mappings(&self) -> &PropertyMappingService {
        &self.mappings
    }

    /// Entity → DTO conversions
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Link builder rooted at the public base URL
    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Response mode requested by a request's `Accept` headers
    pub fn response_mode(&self, headers: &HeaderMap) -> ResponseMode {
        ResponseMode::from_headers(headers, &self.config.hypermedia.media_type)
    }
}

impl AppState<InMemoryLibraryRepository> {
    /// State backed by the in-memory repository with the sample catalog
    ///
    /// # Errors
    ///
    /// Same as [`AppState::new`].
    pub fn in_memory(config: Config) -> Result<Self> {
        let mappings = Arc::new(profiles::property_mapping_service()?);
        let repository =
            InMemoryLibraryRepository::with_authors(Arc::clone(&mappings), seed_authors());
        Self::new(config, repository, mappings, profiles::mapper())
    }
}
