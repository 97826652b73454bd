use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator used by the api between locations of the same parameter.
pub const LOCATION_SEPARATOR: &str = "|";

/// An ordered list of addresses or "lat,lng" pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Locations(Vec<String>);

impl Locations {
    /// Builds locations from geographic points, x being the longitude.
    pub fn from_points<P>(points: &[P]) -> Self
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        Self(
            points
                .iter()
                .map(|p| {
                    let point: geo_types::Point = p.into();
                    format!("{},{}", point.y(), point.x())
                })
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Locations {
    fn from(location: &str) -> Self {
        Self(vec![location.to_string()])
    }
}

impl From<String> for Locations {
    fn from(location: String) -> Self {
        Self(vec![location])
    }
}

impl From<Vec<String>> for Locations {
    fn from(locations: Vec<String>) -> Self {
        Self(locations)
    }
}

impl From<Vec<&str>> for Locations {
    fn from(locations: Vec<&str>) -> Self {
        locations.as_slice().into()
    }
}

impl From<&[String]> for Locations {
    fn from(locations: &[String]) -> Self {
        Self(locations.to_vec())
    }
}

impl From<&[&str]> for Locations {
    fn from(locations: &[&str]) -> Self {
        Self(locations.iter().map(|l| l.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Locations {
    fn from(locations: [&str; N]) -> Self {
        locations.as_slice().into()
    }
}

impl From<&Locations> for Locations {
    fn from(locations: &Locations) -> Self {
        locations.clone()
    }
}

#[derive(Debug, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelMode::Driving => "driving",
                TravelMode::Walking => "walking",
                TravelMode::Bicycling => "bicycling",
                TravelMode::Transit => "transit",
            }
        )
    }
}

impl FromStr for TravelMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(ParseOptionError {
                kind: "travel mode",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    Metric,
    Imperial,
}

impl Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Units::Metric => "metric",
                Units::Imperial => "imperial",
            }
        )
    }
}

impl FromStr for Units {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(ParseOptionError {
                kind: "units",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Avoid {
    Tolls,
    Highways,
    Ferries,
    Indoor,
}

impl Display for Avoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Avoid::Tolls => "tolls",
                Avoid::Highways => "highways",
                Avoid::Ferries => "ferries",
                Avoid::Indoor => "indoor",
            }
        )
    }
}

impl FromStr for Avoid {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tolls" => Ok(Avoid::Tolls),
            "highways" => Ok(Avoid::Highways),
            "ferries" => Ok(Avoid::Ferries),
            "indoor" => Ok(Avoid::Indoor),
            _ => Err(ParseOptionError {
                kind: "avoid",
                value: s.to_string(),
            }),
        }
    }
}

/// Query parameters sent alongside the origins and destinations.
///
/// Extra parameters keep their insertion order; setting a key twice replaces
/// the first value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixOptions {
    sensor: bool,
    params: Vec<(String, String)>,
}

impl MatrixOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn mode(self, mode: TravelMode) -> Self {
        self.param("mode", mode.to_string())
    }

    pub fn units(self, units: Units) -> Self {
        self.param("units", units.to_string())
    }

    pub fn avoid(self, avoid: Avoid) -> Self {
        self.param("avoid", avoid.to_string())
    }

    pub fn language(self, language: impl Into<String>) -> Self {
        self.param("language", language)
    }

    pub fn departure_time(self, departure_time: jiff::Timestamp) -> Self {
        self.param("departure_time", departure_time.as_second().to_string())
    }

    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.param("key", key)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(key, value);
        self
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_sensor(&self) -> bool {
        self.sensor
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Full parameter list in wire order: origins, destinations, sensor, extras.
    ///
    /// Extras named like one of the three leading parameters override them.
    pub(crate) fn query_pairs(
        &self,
        origins: &[String],
        destinations: &[String],
    ) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("origins".to_string(), origins.join(LOCATION_SEPARATOR)),
            ("destinations".to_string(), destinations.join(LOCATION_SEPARATOR)),
            (
                "sensor".to_string(),
                if self.sensor { "true" } else { "false" }.to_string(),
            ),
        ];

        for (key, value) in &self.params {
            match pairs.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = value.clone(),
                None => pairs.push((key.clone(), value.clone())),
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_string_is_one_location() {
        let single: Locations = "Chicago, IL".into();
        let list: Locations = vec!["Chicago, IL"].into();

        assert_eq!(single, list);
        assert_eq!(single.len(), 1);
    }

    struct LatLng {
        lat: f64,
        lng: f64,
    }

    impl From<&LatLng> for geo_types::Point {
        fn from(value: &LatLng) -> Self {
            geo_types::Point::new(value.lng, value.lat)
        }
    }

    #[test]
    fn test_from_points_is_lat_lng() {
        let points = vec![LatLng {
            lat: 50.85,
            lng: 4.35,
        }];

        let locations = Locations::from_points(&points);

        assert_eq!(locations.as_slice(), &["50.85,4.35".to_string()]);
    }

    #[test]
    fn test_query_pairs_order() {
        let options = MatrixOptions::new()
            .mode(TravelMode::Walking)
            .units(Units::Imperial);

        let pairs = options.query_pairs(&["A".to_string(), "B".to_string()], &["C".to_string()]);

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["origins", "destinations", "sensor", "mode", "units"]);
        assert_eq!(pairs[0].1, "A|B");
        assert_eq!(pairs[2].1, "false");
        assert_eq!(pairs[3].1, "walking");
        assert_eq!(pairs[4].1, "imperial");
    }

    #[test]
    fn test_sensor_serialization() {
        let pairs = MatrixOptions::new()
            .sensor(true)
            .query_pairs(&["A".to_string()], &["B".to_string()]);

        assert_eq!(pairs[2], ("sensor".to_string(), "true".to_string()));
    }

    #[test]
    fn test_param_replaces_in_place() {
        let options = MatrixOptions::new()
            .param("language", "en")
            .api_key("abc")
            .language("fr");

        assert_eq!(
            options.params(),
            &[
                ("language".to_string(), "fr".to_string()),
                ("key".to_string(), "abc".to_string())
            ]
        );
    }

    #[test]
    fn test_extra_overrides_leading_param() {
        let pairs = MatrixOptions::new()
            .param("sensor", "maybe")
            .query_pairs(&["A".to_string()], &["B".to_string()]);

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2].1, "maybe");
    }

    #[test]
    fn test_from_str_matches_display() {
        for mode in [
            TravelMode::Driving,
            TravelMode::Walking,
            TravelMode::Bicycling,
            TravelMode::Transit,
        ] {
            assert_eq!(mode.to_string().parse::<TravelMode>().unwrap(), mode);
        }

        assert_eq!("imperial".parse::<Units>().unwrap(), Units::Imperial);
        assert_eq!("ferries".parse::<Avoid>().unwrap(), Avoid::Ferries);
        assert_eq!(
            "flying".parse::<TravelMode>().unwrap_err().to_string(),
            "Unknown travel mode: flying"
        );
    }

    #[test]
    fn test_departure_time_is_epoch_seconds() {
        let timestamp: jiff::Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();

        let options = MatrixOptions::new().departure_time(timestamp);

        assert_eq!(options.get("departure_time"), Some("1704067200"));
    }
}
