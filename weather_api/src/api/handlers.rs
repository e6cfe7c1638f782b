use crate::api::api_models::LiveWeatherDto;
use crate::api::error::ApiError;
use crate::coordinate::Coordinate;
use crate::live::fetch_live_weather;
use crate::nws::NwsClient;
use axum::Json;
use axum::extract::State;

/// On success, returns [`LiveWeatherDto`] as JSON: the latest observation near the coordinate
/// (or `null`) and the active alerts for it.
pub async fn get_live_weather(
    State(nws): State<NwsClient>,
    coordinate: Coordinate,
) -> Result<Json<LiveWeatherDto>, ApiError> {
    Ok(Json(fetch_live_weather(&nws, coordinate).await?))
}
