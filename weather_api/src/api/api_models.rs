use crate::nws::models::{AlertProperties, Feature, ObservationProperties, QuantitativeValue};
use serde::Serialize;

const FAHRENHEIT_UNIT: &str = "wmoUnit:degF";

#[derive(Debug, Serialize, PartialEq)]
pub struct LiveWeatherDto {
    pub current: Option<CurrentObservationDto>,
    pub alerts: Vec<AlertDto>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CurrentObservationDto {
    pub station_id: String,
    pub observed_at: Option<String>,
    pub temperature_f: Option<f64>,
    pub text_description: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AlertDto {
    pub id: Option<String>,
    pub event: Option<String>,
    pub headline: Option<String>,
    pub severity: Option<String>,
    pub expires: Option<String>,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Observation temperatures are reported in Celsius; a reading already in Fahrenheit is passed through.
fn temperature_f(temperature: Option<QuantitativeValue>) -> Option<f64> {
    let temperature = temperature?;
    let value = temperature.value?;
    if temperature.unit_code.as_deref() == Some(FAHRENHEIT_UNIT) {
        Some(value)
    } else {
        Some(celsius_to_fahrenheit(value))
    }
}

impl CurrentObservationDto {
    pub fn new(station_id: String, properties: Option<ObservationProperties>) -> Self {
        let (observed_at, temperature_f, text_description) = match properties {
            Some(p) => (p.timestamp, temperature_f(p.temperature), p.text_description),
            None => (None, None, None),
        };
        Self {
            station_id,
            observed_at,
            temperature_f,
            text_description,
        }
    }
}

impl From<Feature<AlertProperties>> for AlertDto {
    fn from(feature: Feature<AlertProperties>) -> Self {
        let (event, headline, severity, expires) = match feature.properties {
            Some(p) => (p.event, p.headline, p.severity, p.expires),
            None => (None, None, None, None),
        };
        Self {
            id: feature.id,
            event,
            headline,
            severity,
            expires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nws::models::FeatureCollection;
    use serde_json::json;

    #[test]
    fn converts_celsius_exactly() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn missing_temperature_stays_null() {
        assert_eq!(temperature_f(None), None);
        assert_eq!(
            temperature_f(Some(QuantitativeValue {
                value: None,
                unit_code: Some("wmoUnit:degC".to_string()),
            })),
            None
        );
    }

    #[test]
    fn fahrenheit_reading_is_not_converted_twice() {
        let reading = QuantitativeValue {
            value: Some(71.6),
            unit_code: Some(FAHRENHEIT_UNIT.to_string()),
        };
        assert_eq!(temperature_f(Some(reading)), Some(71.6));
    }

    #[test]
    fn observation_without_properties_keeps_station() {
        let dto = CurrentObservationDto::new("KORF".to_string(), None);
        assert_eq!(dto.station_id, "KORF");
        assert!(dto.observed_at.is_none());
        assert!(dto.temperature_f.is_none());
        assert!(dto.text_description.is_none());
    }

    #[test]
    fn alerts_keep_order_and_default_missing_fields() {
        let collection: FeatureCollection<AlertProperties> = serde_json::from_value(json!({
            "features": [
                {
                    "id": "urn:oid:2.49.0.1.840.0.first",
                    "properties": {
                        "event": "Flood Warning",
                        "headline": "Flood Warning issued January 15",
                        "severity": "Severe",
                        "expires": "2025-01-16T06:00:00-05:00"
                    }
                },
                { "id": "urn:oid:2.49.0.1.840.0.second" },
                { "properties": null }
            ]
        }))
        .unwrap();

        let alerts: Vec<AlertDto> = collection.into_features().into_iter().map(AlertDto::from).collect();

        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].event.as_deref(), Some("Flood Warning"));
        assert_eq!(
            alerts[0].expires.as_deref(),
            Some("2025-01-16T06:00:00-05:00")
        );
        assert_eq!(alerts[1].id.as_deref(), Some("urn:oid:2.49.0.1.840.0.second"));
        assert!(alerts[1].event.is_none());
        assert_eq!(
            alerts[2],
            AlertDto {
                id: None,
                event: None,
                headline: None,
                severity: None,
                expires: None,
            }
        );
    }

    #[test]
    fn serializes_nulls_explicitly() {
        let dto = LiveWeatherDto {
            current: None,
            alerts: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "current": null, "alerts": [] })
        );
    }
}
