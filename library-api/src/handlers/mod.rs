//! HTTP boundary for the author catalog
//!
//! Handlers validate the request against the sort and field registries, fetch
//! through the [`LibraryRepository`], and hand the shaped, negotiated result
//! to axum for serialization. The `X-Pagination` header is written here.

mod authors;
mod books;
mod response;
mod root;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};

use crate::{
    error::{Error, Result},
    negotiation::is_acceptable,
    repository::LibraryRepository,
    state::AppState,
};

pub use response::{Created, PAGINATION_HEADER};

/// Query string of single-resource reads
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FieldsQuery {
    /// Comma-separated field selection
    pub fields: Option<String>,
}

impl FieldsQuery {
    /// Field selection, `None` when absent or blank
    #[must_use]
    pub fn fields(&self) -> Option<&str> {
        self.fields
            .as_deref()
            .map(str::trim)
            .filter(|fields| !fields.is_empty())
    }
}

/// Answers `406 Not Acceptable` when no `Accept` range is JSON, a wildcard
/// or the configured hypermedia media type
async fn reject_unacceptable<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let media_type = &state.config().hypermedia.media_type;
    if !is_acceptable(request.headers(), media_type) {
        tracing::debug!(uri = %request.uri(), "No acceptable media type requested");
        return Err(Error::NotAcceptable(format!(
            "supported media types are application/json and {}",
            media_type
        )));
    }
    Ok(next.run(request).await)
}

/// All API routes bound to `state`
pub fn router<R: LibraryRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route("/api", get(root::get_root::<R>))
        .route(
            "/api/authors",
            get(authors::list_authors::<R>)
                .post(authors::create_author::<R>)
                .options(authors::authors_options),
        )
        .route(
            "/api/authors/{id}",
            get(authors::get_author::<R>)
                .post(authors::block_author_creation::<R>)
                .delete(authors::delete_author::<R>),
        )
        .route(
            "/api/authors/{id}/books",
            get(books::list_books::<R>).post(books::create_book::<R>),
        )
        .route("/api/authors/{id}/books/{book_id}", get(books::get_book::<R>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            reject_unacceptable::<R>,
        ))
        .with_state(state)
}
