use crate::api::error::ApiError;
use crate::coordinate::Coordinate;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

// Kept as text so a malformed number is reported with the usage hint rather than a serde message
#[derive(Debug, Deserialize)]
struct RawCoordinate {
    lat: Option<String>,
    lon: Option<String>,
}

/// Extracts a [`Coordinate`] from the `lat` and `lon` query parameters, rejecting the request
/// with [`ApiError::InvalidCoordinate`] before the handler runs.
impl<S> FromRequestParts<S> for Coordinate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<RawCoordinate>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidCoordinate)?;

        Coordinate::parse(params.lat.as_deref(), params.lon.as_deref())
            .ok_or(ApiError::InvalidCoordinate)
    }
}
