//! Request extractors that reject with the API error envelope.
//!
//! axum's stock extractors answer a malformed body or query string with a
//! plain-text response. Every error this API sends is `{ code, message }`
//! JSON, extractor rejections included, so the handlers take these
//! wrappers instead of the stock types. The rejection's own status code
//! is kept; only the body shape changes.

use axum::{
    extract::{FromRequest, FromRequestParts, Multipart, Query, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use super::types::ErrorResponse;

type Rejection = (StatusCode, Json<ErrorResponse>);

fn envelope(status: StatusCode, message: String) -> Rejection {
    (status, Json(ErrorResponse::bad_request(message)))
}

/// JSON body extractor with an enveloped rejection.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(envelope(rejection.status(), rejection.body_text())),
        }
    }
}

/// Query string extractor with an enveloped rejection.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(envelope(rejection.status(), rejection.body_text())),
        }
    }
}

/// Multipart body extractor with an enveloped rejection.
pub struct MultipartUpload(pub Multipart);

impl<S> FromRequest<S> for MultipartUpload
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(MultipartUpload(multipart)),
            Err(rejection) => Err(envelope(rejection.status(), rejection.body_text())),
        }
    }
}
