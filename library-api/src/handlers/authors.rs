//! Author collection and item endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header::ALLOW, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::{response::Created, FieldsQuery};
use crate::{
    domain::{Author, AuthorDto, AuthorForCreation},
    error::{Error, Result},
    negotiation::{negotiate_authors, NegotiatedCollection},
    paging::ResourceParameters,
    repository::{ChangeSet, LibraryRepository},
    shaping::{shape, validate_fields, ShapedEntity},
    state::AppState,
};

/// `GET /api/authors`
pub async fn list_authors<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
    Query(params): Query<ResourceParameters>,
) -> Result<NegotiatedCollection> {
    state
        .mappings()
        .validate_order_by::<AuthorDto, Author>(&params.order_by)?;
    validate_fields::<AuthorDto>(params.fields.as_deref())?;

    let authors = state.repository().get_authors(&params).await?;
    let authors = authors.try_map(|author| state.mapper().map::<Author, AuthorDto>(&author))?;

    negotiate_authors(
        state.response_mode(&headers),
        &params,
        &authors,
        state.links(),
    )
}

/// `OPTIONS /api/authors`
pub async fn authors_options() -> impl IntoResponse {
    (StatusCode::OK, [(ALLOW, "GET,OPTIONS,POST")])
}

/// `GET /api/authors/{id}`: shaped author with its links
pub async fn get_author<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<ShapedEntity>> {
    validate_fields::<AuthorDto>(query.fields.as_deref())?;

    let author = state
        .repository()
        .get_author(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Author {} not found", id)))?;
    let dto: AuthorDto = state.mapper().map(&author)?;

    let fields = query.fields();
    let shaped = shape(&dto, fields)?.with_links(state.links().build_author_links(id, fields));
    Ok(Json(shaped))
}

/// `POST /api/authors`: create an author with optional books
pub async fn create_author<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    Json(payload): Json<AuthorForCreation>,
) -> Result<Created<ShapedEntity>> {
    payload.validate()?;

    let author: Author = state.mapper().map(&payload)?;
    let id = author.id;
    let dto: AuthorDto = state.mapper().map(&author)?;

    let mut changes = ChangeSet::new();
    changes.add_author(author);
    if !state.repository().save(changes).await {
        return Err(Error::Persistence(format!(
            "Creating author {} failed on save",
            id
        )));
    }

    tracing::info!(author_id = %id, "Author created");

    let shaped = shape(&dto, None)?.with_links(state.links().build_author_links(id, None));
    Ok(Created::new(state.links().author_uri(id, None), shaped))
}

/// `POST /api/authors/{id}`: creation on an item URI is never allowed
pub async fn block_author_creation<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.repository().author_exists(id).await? {
        Err(Error::Conflict(format!("Author {} already exists", id)))
    } else {
        Err(Error::NotFound(format!("Author {} not found", id)))
    }
}

/// `DELETE /api/authors/{id}`: remove an author and its books
pub async fn delete_author<R: LibraryRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let author = state
        .repository()
        .get_author(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Author {} not found", id)))?;

    let mut changes = ChangeSet::new();
    changes.delete_author(&author);
    if !state.repository().save(changes).await {
        return Err(Error::Persistence(format!(
            "Deleting author {} failed on save",
            id
        )));
    }

    tracing::info!(author_id = %id, "Author deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::{header::LOCATION, Method, StatusCode};
    use serde_json::{json, Value};

    use crate::handlers::test_support::{app, get_linked, json, send, send_json};
    use crate::handlers::PAGINATION_HEADER;

    const KING: &str = "25320c5e-f58a-4b1f-b63a-8ee07a840bdf";

    fn pagination(response: &axum::response::Response) -> Value {
        serde_json::from_str(response.headers()[PAGINATION_HEADER].to_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_plain_collection() {
        let response = send(&app(), Method::GET, "/api/authors?pageSize=3", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let header = pagination(&response);
        assert_eq!(header["currentPage"], 1);
        assert_eq!(header["pageSize"], 3);
        assert_eq!(header["totalCount"], 8);
        assert_eq!(header["totalPages"], 3);
        assert!(header.get("previousPageLink").is_none());
        assert!(header["nextPageLink"]
            .as_str()
            .unwrap()
            .contains("pageNumber=2"));

        let body = json(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item.get("links").is_none()));
        assert_eq!(items[0]["name"], "Douglas Adams");
    }

    #[tokio::test]
    async fn test_linked_collection_with_field_selection() {
        let response = get_linked(&app(), "/api/authors?fields=firstName&pageSize=2&pageNumber=2").await;
        assert_eq!(response.status(), StatusCode::OK);

        let header = pagination(&response);
        assert!(header["previousPageLink"].is_string());

        let body = json(response).await;
        let first = &body["value"][0];
        assert_eq!(first.as_object().unwrap().len(), 3);
        assert!(first["id"].is_string());
        assert!(first["firstName"].is_string());
        assert!(first["links"][0]["href"]
            .as_str()
            .unwrap()
            .contains("fields=firstName"));

        let rels: Vec<&str> = body["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|link| link["rel"].as_str().unwrap())
            .collect();
        assert_eq!(rels, ["self", "nextPage", "previousPage"]);
    }

    #[tokio::test]
    async fn test_oversized_page_is_clamped() {
        let response = send(&app(), Method::GET, "/api/authors?pageSize=50", None).await;
        assert_eq!(pagination(&response)["pageSize"], 20);
    }

    #[tokio::test]
    async fn test_page_size_beyond_u32_is_clamped() {
        let app = app();
        let response = send(&app, Method::GET, "/api/authors?pageSize=5000000000", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(pagination(&response)["pageSize"], 20);

        let response = send(&app, Method::GET, "/api/authors?pageNumber=99999999999", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_unsupported_accept_is_not_acceptable() {
        let app = app();
        let response = send(&app, Method::GET, "/api/authors", Some("text/html")).await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(json(response).await["code"], "NOT_ACCEPTABLE");

        let uri = format!("/api/authors/{}", KING);
        let response = send(&app, Method::GET, &uri, Some("application/xml")).await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

        for accept in ["text/html, application/json", "*/*", "application/*;q=0.8"] {
            let response = send(&app, Method::GET, "/api/authors", Some(accept)).await;
            assert_eq!(response.status(), StatusCode::OK, "Accept: {}", accept);
        }
    }

    #[tokio::test]
    async fn test_invalid_sort_and_fields_are_bad_requests() {
        let app = app();
        let response = send(&app, Method::GET, "/api/authors?orderBy=dateOfBirth", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["code"], "INVALID_SORT_KEY");

        let response = send(&app, Method::GET, "/api/authors?fields=id,shoeSize", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::GET, &format!("/api/authors/{}?fields=isbn", KING), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_filter_and_sort() {
        let app = app();
        let response = send(&app, Method::GET, "/api/authors?genre=fantasy&orderBy=age", None).await;
        let body = json(response).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Neil Gaiman", "George RR Martin"]);

        let response = send(&app, Method::GET, "/api/authors?searchQuery=thrill", None).await;
        assert_eq!(json(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_author() {
        let response = send(&app(), Method::GET, &format!("/api/authors/{}?fields=name", KING), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["id"], KING);
        assert_eq!(body["name"], "Stephen King");
        assert!(body.get("genre").is_none());
        assert_eq!(body["links"].as_array().unwrap().len(), 4);
        assert!(body["links"][0]["href"].as_str().unwrap().ends_with("?fields=name"));
    }

    #[tokio::test]
    async fn test_unknown_author_is_not_found() {
        let uri = format!("/api/authors/{}", uuid::Uuid::new_v4());
        let response = send(&app(), Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_author() {
        let app = app();
        let response = send_json(
            &app,
            Method::POST,
            "/api/authors",
            json!({
                "firstName": "Octavia",
                "lastName": "Butler",
                "dateOfBirth": "1947-06-22",
                "dateOfDeath": "2006-02-24",
                "genre": "Science fiction",
                "books": [{ "title": "Kindred" }]
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let location = response.headers()[LOCATION].to_str().unwrap().to_string();
        let body = json(response).await;
        let id = body["id"].as_str().unwrap();
        assert_eq!(location, format!("http://localhost:8080/api/authors/{}", id));
        assert_eq!(body["name"], "Octavia Butler");
        assert_eq!(body["age"], 58);
        assert_eq!(body["links"][0]["rel"], "self");

        let books = send(&app, Method::GET, &format!("/api/authors/{}/books", id), None).await;
        assert_eq!(json(books).await[0]["title"], "Kindred");
    }

    #[tokio::test]
    async fn test_create_author_rejects_blank_name() {
        let response = send_json(
            &app(),
            Method::POST,
            "/api/authors",
            json!({
                "firstName": "",
                "lastName": "Nobody",
                "dateOfBirth": "1990-01-01",
                "genre": "Poetry"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_to_item_uri() {
        let app = app();
        let response = send(&app, Method::POST, &format!("/api/authors/{}", KING), None).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let uri = format!("/api/authors/{}", uuid::Uuid::new_v4());
        let response = send(&app, Method::POST, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_author() {
        let app = app();
        let uri = format!("/api/authors/{}", KING);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_match_stored_state() {
        let app = app();
        let mut tasks = tokio::task::JoinSet::new();

        for n in 0..12 {
            let app = app.clone();
            tasks.spawn(async move {
                let created = send_json(
                    &app,
                    Method::POST,
                    "/api/authors",
                    json!({
                        "firstName": format!("Writer{}", n),
                        "lastName": "Parallel",
                        "dateOfBirth": "1970-01-01",
                        "genre": "Anthology"
                    }),
                )
                .await;
                let status = created.status();
                let location = created.headers().get(LOCATION).cloned();
                let listed = send(&app, Method::GET, "/api/authors?genre=Anthology", None).await;
                (status, location, listed.status())
            });
        }

        while let Some(result) = tasks.join_next().await {
            let (status, location, list_status) = result.unwrap();
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(list_status, StatusCode::OK);

            let location = location.unwrap();
            let path = location
                .to_str()
                .unwrap()
                .trim_start_matches("http://localhost:8080")
                .to_string();
            let fetched = send(&app, Method::GET, &path, None).await;
            assert_eq!(fetched.status(), StatusCode::OK);
        }

        let response = send(&app, Method::GET, "/api/authors?genre=Anthology", None).await;
        assert_eq!(pagination(&response)["totalCount"], 12);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_of_one_author() {
        let app = app();
        let uri = format!("/api/authors/{}", KING);
        let mut tasks = tokio::task::JoinSet::new();

        for _ in 0..4 {
            let app = app.clone();
            let uri = uri.clone();
            tasks.spawn(async move { send(&app, Method::DELETE, &uri, None).await.status() });
        }

        let mut deleted = 0;
        while let Some(status) = tasks.join_next().await {
            let status = status.unwrap();
            if status == StatusCode::NO_CONTENT {
                deleted += 1;
            } else {
                // lost the race: already gone on lookup or on save
                assert!(
                    status == StatusCode::NOT_FOUND || status == StatusCode::INTERNAL_SERVER_ERROR,
                    "unexpected status {}",
                    status
                );
            }
        }

        assert_eq!(deleted, 1);
        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options() {
        let response = send(&app(), Method::OPTIONS, "/api/authors", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["allow"], "GET,OPTIONS,POST");
    }
}
