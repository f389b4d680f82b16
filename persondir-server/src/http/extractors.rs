//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::{PersonId, ValidationError};

/// Extract a person id from the path.
///
/// Ids that cannot exist in storage are rejected as not found.
pub struct PersonIdPath(pub PersonId);

impl<S> FromRequestParts<S> for PersonIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                resource: "Person",
                id: String::new(),
            })?;

        PersonId::parse(&raw)
            .map(Self)
            .ok_or(ApiError::NotFound {
                resource: "Person",
                id: raw,
            })
    }
}

/// JSON body whose rejection is reported as a validation error
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.into()))?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => Self::Syntax {
                reason: e.body_text(),
            },
            JsonRejection::JsonDataError(e) => Self::Data {
                reason: e.body_text(),
            },
            JsonRejection::MissingJsonContentType(_) => Self::ContentType,
            other => Self::Body {
                reason: other.body_text(),
            },
        }
    }
}
