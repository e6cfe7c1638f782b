//! Builds the live-weather view for a coordinate: the latest observation from the nearest station
//! plus the active alerts for the point.

use crate::api::api_models::{AlertDto, CurrentObservationDto, LiveWeatherDto};
use crate::api::error::ApiError;
use crate::coordinate::Coordinate;
use crate::nws::models::{
    AlertProperties, Feature, FeatureCollection, ObservationProperties, PointProperties,
    StationProperties,
};
use crate::nws::{NwsClient, NwsError, decode};
use tracing::{info, instrument, warn};

#[instrument(skip(nws))]
pub async fn fetch_live_weather(
    nws: &NwsClient,
    coordinate: Coordinate,
) -> Result<LiveWeatherDto, ApiError> {
    let point_url = nws.point_url(coordinate);
    let point = nws.get_json(&point_url).await?;

    let properties = match point.get("properties") {
        Some(properties) if properties.is_object() => properties.clone(),
        _ => {
            warn!(name: "nws.point.unexpected", payload = %point, "unexpected /points response");
            return Err(ApiError::UnexpectedPoint(point));
        }
    };
    let point: PointProperties = decode(&point_url, properties)?;

    // The observation chain and the alerts lookup share nothing but the coordinate.
    let (current, alerts) = tokio::try_join!(
        current_observation(nws, point.observation_stations.as_deref()),
        active_alerts(nws, coordinate),
    )?;

    info!(
        name: "weather.live.resolved",
        has_current = current.is_some(),
        alerts = alerts.len(),
        "resolved live weather"
    );

    Ok(LiveWeatherDto { current, alerts })
}

/// Takes the first station listed for the point and reads its latest observation. Resolves to
/// `None` if the point has no station list, the list is empty, or the station has no identifier.
async fn current_observation(
    nws: &NwsClient,
    stations_url: Option<&str>,
) -> Result<Option<CurrentObservationDto>, NwsError> {
    let Some(stations_url) = stations_url.filter(|url| !url.is_empty()) else {
        return Ok(None);
    };

    let stations: FeatureCollection<StationProperties> = nws.get(stations_url).await?;
    let Some(station_id) = stations
        .into_features()
        .into_iter()
        .next()
        .and_then(|station| station.properties)
        .and_then(|properties| properties.station_identifier)
        .filter(|id| !id.is_empty())
    else {
        return Ok(None);
    };

    let observation: Feature<ObservationProperties> =
        nws.get(&nws.latest_observation_url(&station_id)).await?;

    Ok(Some(CurrentObservationDto::new(
        station_id,
        observation.properties,
    )))
}

async fn active_alerts(nws: &NwsClient, coordinate: Coordinate) -> Result<Vec<AlertDto>, NwsError> {
    let alerts: FeatureCollection<AlertProperties> =
        nws.get(&nws.active_alerts_url(coordinate)).await?;

    Ok(alerts
        .into_features()
        .into_iter()
        .map(AlertDto::from)
        .collect())
}
