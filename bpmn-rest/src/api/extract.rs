//! Path and query extractors that reject with the crate's JSON error body
//!
//! axum's own `Path` and `Query` reject with plain text. These wrappers turn
//! client-side rejections into [`Error::InvalidArgument`] and anything else
//! into [`Error::Internal`].

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Path parameters, deserialized like [`axum::extract::Path`]
#[derive(Debug)]
pub struct RestPath<T>(pub T);

impl<S, T> FromRequestParts<S> for RestPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        Ok(Self(value))
    }
}

/// Query string, deserialized like [`axum::extract::Query`]
#[derive(Debug)]
pub struct RestQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for RestQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        Ok(Self(value))
    }
}

fn path_rejection(rejection: PathRejection) -> Error {
    if rejection.status().is_server_error() {
        Error::Internal(rejection.body_text())
    } else {
        Error::invalid_argument(rejection.body_text())
    }
}

fn query_rejection(rejection: QueryRejection) -> Error {
    Error::invalid_argument(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::body::{to_bytes, Body};
    use axum::{routing::get, Router};
    use http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn echo_path(RestPath(id): RestPath<String>) -> String {
        id
    }

    async fn echo_query(RestQuery(query): RestQuery<HashMap<String, String>>) -> String {
        query.get("name").cloned().unwrap_or_default()
    }

    async fn echo_number(RestPath(n): RestPath<u32>) -> String {
        n.to_string()
    }

    fn router() -> Router {
        Router::new()
            .route("/items/{id}", get(echo_path))
            .route("/numbers/{n}", get(echo_number))
            .route("/search", get(echo_query))
    }

    async fn call(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_valid_input_is_extracted() {
        assert_eq!(call("/items/a%2Fb").await, (StatusCode::OK, b"a/b".to_vec()));
        assert_eq!(call("/search?name=kermit").await, (StatusCode::OK, b"kermit".to_vec()));
    }

    #[tokio::test]
    async fn test_invalid_utf8_path_is_json_error() {
        let (status, body) = call("/items/%FF").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "INVALID_ARGUMENT");
        assert_eq!(json["status"], 400);
        assert!(!json["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undeserializable_path_is_json_error() {
        let (status, body) = call("/numbers/seven").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "INVALID_ARGUMENT");
    }
}
