use crate::api_models::{LocationDto, WelcomeDto};
use crate::db::queries;
use crate::error::ApiError;
use axum::Json;
use axum::extract::State;
use sqlx::{Pool, Postgres};

pub async fn read_root() -> Json<WelcomeDto> {
    Json(WelcomeDto {
        message: "Welcome to the CrisisCloud API!",
    })
}

/// On success, returns one `{lat, lng}` object per row of `locations`.
pub async fn get_locations(
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<Vec<LocationDto>>, ApiError> {
    let locations = queries::get_locations(&pool)
        .await?
        .into_iter()
        .map(LocationDto::from)
        .collect();
    Ok(Json(locations))
}
