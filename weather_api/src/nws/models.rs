//! Subsets of the NWS GeoJSON documents. Every field is optional; anything the NWS omits surfaces
//! as `null` in our responses instead of failing the request. Timestamps are relayed verbatim.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FeatureCollection<P> {
    pub features: Option<Vec<Feature<P>>>,
}

impl<P> FeatureCollection<P> {
    pub fn into_features(self) -> Vec<Feature<P>> {
        self.features.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct Feature<P> {
    pub id: Option<String>,
    pub properties: Option<P>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    pub observation_stations: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    pub station_identifier: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationProperties {
    pub timestamp: Option<String>,
    pub text_description: Option<String>,
    pub temperature: Option<QuantitativeValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    pub value: Option<f64>,
    /// WMO unit, e.g. `wmoUnit:degC`.
    pub unit_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    pub headline: Option<String>,
    pub severity: Option<String>,
    pub expires: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_members_decode_as_none() {
        let stations: FeatureCollection<StationProperties> =
            serde_json::from_value(json!({ "features": null })).unwrap();
        assert!(stations.into_features().is_empty());

        let observation: Feature<ObservationProperties> = serde_json::from_value(json!({
            "properties": {
                "timestamp": "2025-01-15T14:51:00+00:00",
                "temperature": { "unitCode": "wmoUnit:degC", "value": null }
            }
        }))
        .unwrap();
        let props = observation.properties.unwrap();
        assert!(props.text_description.is_none());
        assert!(props.temperature.unwrap().value.is_none());
        assert_eq!(props.timestamp.as_deref(), Some("2025-01-15T14:51:00+00:00"));
    }
}
