//! Artifact DTOs: the JSON shapes the display layer consumes.
//!
//! Field names are camelCase on the wire. Unresolved coordinates and ids are
//! written as explicit `null`, never omitted and never defaulted to zero.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{book_code, AncientAssociation, GeometryKind, Links};

/// A modern location flattened for map display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryKind>,
    pub thumbnail: Option<String>,
    pub thumbnail_desc: String,
    pub thumbnail_credit: String,
    pub ancient_assoc: IndexMap<String, AncientAssociation>,
    pub names: Vec<String>,
    pub geojson_file: Option<String>,
    pub has_polygon: bool,
}

/// An ancient place with its best modern resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub modern_name: Option<String>,
    pub modern_id: Option<String>,
    pub verses: Vec<PlaceVerse>,
    pub confidence: f64,
    pub translation_names: IndexMap<String, u64>,
    #[serde(deserialize_with = "crate::model::links::deserialize_normalized")]
    pub links: Links,
    pub thumbnail: Option<String>,
    pub thumbnail_credit: String,
    pub geojson_file: Option<String>,
}

impl Place {
    pub fn is_resolved(&self) -> bool {
        self.modern_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceVerse {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub osis: String,
}

impl PlaceVerse {
    pub fn book(&self) -> &str {
        book_code(&self.osis)
    }
}

/// Short-keyed marker projection for the initial map load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightMarker<'a> {
    pub id: &'a str,
    pub n: &'a str,
    pub t: &'a str,
    pub la: f64,
    pub lo: f64,
    /// 1 when the marker has a polygon or path shape.
    pub g: u8,
}

impl<'a> From<&'a Marker> for LightMarker<'a> {
    fn from(m: &'a Marker) -> Self {
        Self {
            id: &m.id,
            n: &m.name,
            t: &m.kind,
            la: m.lat,
            lo: m.lon,
            g: u8::from(m.has_polygon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unresolved_place() -> Place {
        Place {
            id: "A9".into(),
            name: "Nowhere".into(),
            kind: "settlement".into(),
            lat: None,
            lon: None,
            modern_name: None,
            modern_id: None,
            verses: vec![PlaceVerse { reference: None, osis: "Gen.1.1".into() }],
            confidence: 0.0,
            translation_names: IndexMap::new(),
            links: Links::new(),
            thumbnail: None,
            thumbnail_credit: String::new(),
            geojson_file: None,
        }
    }

    #[test]
    fn test_unresolved_place_writes_nulls() {
        let value = serde_json::to_value(unresolved_place()).unwrap();
        assert_eq!(value["lat"], json!(null));
        assert_eq!(value["lon"], json!(null));
        assert_eq!(value["modernId"], json!(null));
        assert_eq!(value["modernName"], json!(null));
        assert!(value.as_object().unwrap().contains_key("modernId"));
        assert_eq!(value["verses"], json!([{"osis": "Gen.1.1"}]));
    }

    #[test]
    fn test_place_links_read_back() {
        let mut place = unresolved_place();
        place.links = Links::from_iter([("wikidata", "https://x")]);
        let text = serde_json::to_string(&place).unwrap();
        let back: Place = serde_json::from_str(&text).unwrap();
        assert_eq!(back, place);
    }

    #[test]
    fn test_light_marker_keys() {
        let marker = Marker {
            id: "M1".into(),
            name: "Jordan".into(),
            kind: "river".into(),
            lat: 32.0,
            lon: 35.5,
            geometry: Some(GeometryKind::Path),
            thumbnail: None,
            thumbnail_desc: String::new(),
            thumbnail_credit: String::new(),
            ancient_assoc: IndexMap::new(),
            names: Vec::new(),
            geojson_file: Some("jordan.geojson".into()),
            has_polygon: true,
        };
        let light = serde_json::to_value(LightMarker::from(&marker)).unwrap();
        assert_eq!(
            light,
            json!({"id": "M1", "n": "Jordan", "t": "river", "la": 32.0, "lo": 35.5, "g": 1})
        );

        let full = serde_json::to_value(&marker).unwrap();
        assert_eq!(full["geometry"], json!("path"));
        assert_eq!(full["hasPolygon"], json!(true));
        assert_eq!(full["geojsonFile"], json!("jordan.geojson"));
    }
}
