//! API root document

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{repository::LibraryRepository, state::AppState};

/// `GET /api`: entry links in hypermedia mode, `204` otherwise
pub async fn get_root<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
) -> Response {
    if state.response_mode(&headers).is_linked() {
        Json(state.links().build_root_links()).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
