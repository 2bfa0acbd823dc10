//! Response conversions for negotiated and created resources

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, LOCATION},
        HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::Error,
    negotiation::NegotiatedCollection,
    paging::PaginationMetadata,
};

/// Header carrying the JSON pagination summary of a collection response
pub const PAGINATION_HEADER: HeaderName = HeaderName::from_static("x-pagination");

fn pagination_header(pagination: &PaginationMetadata) -> Result<HeaderValue, Error> {
    let json = serde_json::to_string(pagination)
        .map_err(|e| Error::Internal(format!("failed to serialize pagination: {}", e)))?;
    Ok(HeaderValue::from_str(&json).map_err(axum::http::Error::from)?)
}

impl IntoResponse for NegotiatedCollection {
    fn into_response(self) -> Response {
        let header = match pagination_header(self.pagination()) {
            Ok(header) => header,
            Err(e) => return e.into_response(),
        };

        let mut response = match self {
            Self::Plain { value, .. } => Json(value).into_response(),
            Self::Linked { body, .. } => Json(body).into_response(),
        };
        response.headers_mut().insert(PAGINATION_HEADER, header);
        response
    }
}

/// `201 Created` with a `Location` header and a JSON body
#[derive(Debug)]
pub struct Created<T> {
    location: String,
    body: T,
}

impl<T> Created<T> {
    /// Response for a resource created at `location`
    pub fn new(location: impl Into<String>, body: T) -> Self {
        Self {
            location: location.into(),
            body,
        }
    }
}

impl<T: Serialize> Created<T> {
    fn try_into_response(self) -> Result<Response, Error> {
        let body = serde_json::to_vec(&self.body)
            .map_err(|e| Error::Internal(format!("failed to serialize body: {}", e)))?;
        Ok(Response::builder()
            .status(StatusCode::CREATED)
            .header(LOCATION, self.location)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))?)
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        self.try_into_response()
            .unwrap_or_else(IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::PagedList;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_plain_collection_response() {
        let pagination = PagedList::new(vec![0u8; 2], 5, 1, 2)
            .metadata()
            .with_page_links(None, Some("http://localhost:8080/api/authors?pageNumber=2".into()));
        let response = NegotiatedCollection::Plain {
            value: Vec::new(),
            pagination,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let header: serde_json::Value =
            serde_json::from_str(response.headers()[PAGINATION_HEADER].to_str().unwrap()).unwrap();
        assert_eq!(header["totalPages"], 3);
        assert_eq!(
            header["nextPageLink"],
            "http://localhost:8080/api/authors?pageNumber=2"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"[]");
    }

    #[tokio::test]
    async fn test_created_response() {
        let response = Created::new("http://localhost:8080/api/authors/1", serde_json::json!({"id": 1}))
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[LOCATION],
            "http://localhost:8080/api/authors/1"
        );
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_created_with_invalid_location_is_http_error() {
        let response = Created::new("http://localhost/api/authors/\n1", serde_json::json!({}))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "HTTP_ERROR");
    }
}
