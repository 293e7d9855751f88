//! Ancient place records (`ancient.jsonl`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{nullable, Links};

/// A place referenced in scripture, possibly associated with one or more
/// modern locations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AncientPlace {
    pub id: String,
    #[serde(rename = "friendly_id", default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub verses: Vec<VerseRef>,
    /// Candidate modern locations keyed by modern id, in input order.
    #[serde(default, deserialize_with = "nullable")]
    pub modern_associations: IndexMap<String, Candidate>,
    #[serde(default, deserialize_with = "nullable")]
    pub identifications: Vec<Identification>,
    /// Alternate spelling → number of translations using it.
    #[serde(default, deserialize_with = "nullable")]
    pub translation_name_counts: IndexMap<String, u64>,
    #[serde(default)]
    pub linked_data: Links,
    #[serde(default)]
    pub geojson_file: Option<String>,
}

impl AncientPlace {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: String::new(),
            verses: Vec::new(),
            modern_associations: IndexMap::new(),
            identifications: Vec::new(),
            translation_name_counts: IndexMap::new(),
            linked_data: Links::new(),
            geojson_file: None,
        }
    }

    pub fn with_candidate(mut self, modern_id: impl Into<String>, score: f64, name: impl Into<String>) -> Self {
        self.modern_associations.insert(
            modern_id.into(),
            Candidate { score: Some(score), name: Some(name.into()) },
        );
        self
    }

    pub fn with_verse(mut self, osis: impl Into<String>, readable: impl Into<String>) -> Self {
        self.verses.push(VerseRef { osis: osis.into(), readable: Some(readable.into()) });
        self
    }

    pub fn with_identification(mut self, total: Option<f64>) -> Self {
        self.identifications.push(Identification {
            score: Some(IdentificationScore { total }),
        });
        self
    }
}

/// A scripture reference: OSIS code plus its human-readable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRef {
    pub osis: String,
    #[serde(default)]
    pub readable: Option<String>,
}

/// An association candidate. Without a numeric score it can never win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    #[serde(default)]
    pub score: Option<IdentificationScore>,
}

impl Identification {
    pub fn total(&self) -> Option<f64> {
        self.score.as_ref()?.total
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentificationScore {
    #[serde(default)]
    pub total: Option<f64>,
}
