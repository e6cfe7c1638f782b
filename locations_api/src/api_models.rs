use crate::db::queries::LocationRecord;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct WelcomeDto {
    pub message: &'static str,
}

impl From<LocationRecord> for LocationDto {
    fn from(record: LocationRecord) -> Self {
        Self {
            lat: record.latitude,
            lng: record.longitude,
        }
    }
}
