use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Parses a latitude/longitude pair given as text. Returns `None` if either is missing, not a
    /// number, or not finite.
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Option<Self> {
        Some(Self {
            latitude: parse_component(lat?)?,
            longitude: parse_component(lon?)?,
        })
    }
}

fn parse_component(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
