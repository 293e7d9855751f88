//! Coordinate pairs encoded as `"lon,lat"` strings.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A WGS84 position, longitude first as in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordError {
    #[error("expected \"lon,lat\", got {0:?}")]
    Shape(String),

    #[error("invalid {axis} {value:?}")]
    Component { axis: &'static str, value: String },
}

impl FromStr for LonLat {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, CoordError> {
        let Some((lon, lat)) = s.split_once(',') else {
            return Err(CoordError::Shape(s.to_string()));
        };
        if lat.contains(',') {
            return Err(CoordError::Shape(s.to_string()));
        }
        Ok(Self {
            lon: component("longitude", lon)?,
            lat: component("latitude", lat)?,
        })
    }
}

fn component(axis: &'static str, raw: &str) -> Result<f64, CoordError> {
    let invalid = || CoordError::Component { axis, value: raw.to_string() };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    // JSON has no encoding for NaN or infinities
    if value.is_finite() { Ok(value) } else { Err(invalid()) }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

impl Serialize for LonLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LonLat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse() {
        let c: LonLat = "35.2,31.7".parse().unwrap();
        assert_eq!(c, LonLat::new(35.2, 31.7));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let c: LonLat = " 35.2 , 31.7 ".parse().unwrap();
        assert_eq!(c, LonLat::new(35.2, 31.7));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(matches!("35.2".parse::<LonLat>(), Err(CoordError::Shape(_))));
        assert!(matches!("1,2,3".parse::<LonLat>(), Err(CoordError::Shape(_))));
        assert!(matches!(
            "east,31.7".parse::<LonLat>(),
            Err(CoordError::Component { axis: "longitude", .. })
        ));
        assert!(matches!(
            "35.2,NaN".parse::<LonLat>(),
            Err(CoordError::Component { axis: "latitude", .. })
        ));
    }

    #[test]
    fn test_deserialize_from_json_string() {
        let c: LonLat = serde_json::from_str("\"-0.5,51.25\"").unwrap();
        assert_eq!(c, LonLat::new(-0.5, 51.25));
        assert!(serde_json::from_str::<LonLat>("\"nowhere\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_decode_preserves_values(lon in -180.0f64..180.0, lat in -90.0f64..90.0) {
            let encoded = format!("{lon},{lat}");
            let decoded: LonLat = encoded.parse().unwrap();
            prop_assert_eq!(decoded, LonLat::new(lon, lat));
            prop_assert_eq!(decoded.to_string(), encoded);
        }
    }
}
