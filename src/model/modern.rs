//! Modern location records (`modern.jsonl`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{nullable, LonLat};

/// A present-day geographic entity with known coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModernLocation {
    pub id: String,
    #[serde(rename = "friendly_id", default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(rename = "lonlat")]
    pub coord: LonLat,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<GeometryKind>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default, deserialize_with = "nullable")]
    pub names: SmallVec<[AltName; 2]>,
    #[serde(default, deserialize_with = "nullable")]
    pub ancient_associations: IndexMap<String, AncientAssociation>,
    #[serde(default)]
    pub geojson_file: Option<String>,
}

impl ModernLocation {
    pub fn new(id: impl Into<String>, label: impl Into<String>, coord: LonLat) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            coord,
            kind: String::new(),
            geometry: None,
            media: None,
            names: SmallVec::new(),
            ancient_associations: IndexMap::new(),
            geojson_file: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_geometry(mut self, geometry: GeometryKind) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: Thumbnail) -> Self {
        self.media = Some(Media { thumbnail: Some(thumbnail) });
        self
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.media.as_ref()?.thumbnail.as_ref()
    }

    /// Thumbnail file name; an empty string counts as no thumbnail.
    pub fn thumbnail_file(&self) -> Option<&str> {
        self.thumbnail()?.file.as_deref().filter(|f| !f.is_empty())
    }

    pub fn thumbnail_credit(&self) -> &str {
        self.thumbnail().and_then(|t| t.credit.as_deref()).unwrap_or_default()
    }
}

/// How a location's shape is drawn. Anything beyond a point lives in an
/// external geometry file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Point,
    Polygon,
    Path,
    #[serde(untagged)]
    Other(String),
}

impl GeometryKind {
    /// Polygons and paths are both rendered as a shape layer.
    pub fn has_polygon(&self) -> bool {
        matches!(self, GeometryKind::Polygon | GeometryKind::Path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub file: Option<String>,
    /// May contain HTML markup.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub credit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltName {
    pub name: String,
}

/// Back-reference from a modern location to an ancient place. Carried
/// through to the marker verbatim, unknown fields included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AncientAssociation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "M1",
            "friendly_id": "Jerusalem",
            "lonlat": "35.2,31.7",
            "type": "settlement",
            "geometry": "polygon",
            "media": {"thumbnail": {"file": "jer.jpg", "description": "<b>Old</b> city", "credit": "CC"}},
            "names": [{"name": "Salem"}, {"name": "Zion"}],
            "ancient_associations": {"A1": {"name": "Jerusalem", "score": 1000, "count": 3}},
            "geojson_file": "jerusalem.geojson",
            "unrelated": true
        }"#;
        let m: ModernLocation = serde_json::from_str(json).unwrap();

        assert_eq!(m.label, "Jerusalem");
        assert_eq!(m.coord, LonLat::new(35.2, 31.7));
        assert_eq!(m.geometry, Some(GeometryKind::Polygon));
        assert_eq!(m.thumbnail_file(), Some("jer.jpg"));
        assert_eq!(m.thumbnail_credit(), "CC");
        assert_eq!(m.names.len(), 2);
        let assoc = &m.ancient_associations["A1"];
        assert_eq!(assoc.name.as_deref(), Some("Jerusalem"));
        assert_eq!(assoc.extra["count"], serde_json::json!(3));
    }

    #[test]
    fn test_minimal_record_and_nulls() {
        let json = r#"{"id": "M2", "lonlat": "1,2", "names": null, "media": null}"#;
        let m: ModernLocation = serde_json::from_str(json).unwrap();
        assert_eq!(m.label, "");
        assert!(m.names.is_empty());
        assert_eq!(m.thumbnail_file(), None);
        assert_eq!(m.thumbnail_credit(), "");
    }

    #[test]
    fn test_missing_coordinate_is_rejected() {
        assert!(serde_json::from_str::<ModernLocation>(r#"{"id": "M3"}"#).is_err());
    }

    #[test]
    fn test_geometry_kinds() {
        let kinds: Vec<GeometryKind> =
            serde_json::from_str(r#"["point", "polygon", "path", "region"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                GeometryKind::Point,
                GeometryKind::Polygon,
                GeometryKind::Path,
                GeometryKind::Other("region".into()),
            ]
        );
        let flags: Vec<bool> = kinds.iter().map(GeometryKind::has_polygon).collect();
        assert_eq!(flags, vec![false, true, true, false]);
        assert_eq!(serde_json::to_string(&kinds[3]).unwrap(), r#""region""#);
    }

    #[test]
    fn test_empty_thumbnail_file_counts_as_none() {
        let m = ModernLocation::new("M4", "X", LonLat::default()).with_thumbnail(Thumbnail {
            file: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(m.thumbnail_file(), None);
    }
}
