//! Linked-data references (external authorities such as Wikidata).
//!
//! The dataset stores `linked_data` in two shapes:
//!
//! ```text
//! [{"type": "wikidata", "url": "https://..."}]     list form
//! {"wikidata": {"url": "https://..."}}             map form
//! ```
//!
//! Both deserialize into the same [`Links`] mapping (link type → url).
//! Entries without a string url are dropped one at a time, as are list
//! entries without a type.

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Link type → url, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Links(IndexMap<String, String>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: &str) -> Option<&str> {
        self.0.get(kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Later entries of the same type overwrite earlier ones in place.
    fn insert(&mut self, kind: String, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.0.insert(kind, url);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Links {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Ingestion shapes
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLinkedData {
    List(Vec<RawEntry>),
    Map(IndexMap<String, RawEntry>),
    /// `null` or anything unrecognized carries no links.
    Other(IgnoredAny),
}

/// One list element or map value. Anything that is not a link object is
/// dropped on its own without affecting its siblings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Link(RawLink),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
struct RawLink {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl RawEntry {
    fn into_link(self) -> Option<RawLink> {
        match self {
            RawEntry::Link(link) => Some(link),
            RawEntry::Other(_) => None,
        }
    }
}

impl From<RawLinkedData> for Links {
    fn from(raw: RawLinkedData) -> Self {
        let mut links = Links::new();
        match raw {
            RawLinkedData::List(entries) => {
                for entry in entries.into_iter().filter_map(RawEntry::into_link) {
                    if let Some(kind) = entry.kind {
                        links.insert(kind, entry.url);
                    }
                }
            }
            RawLinkedData::Map(entries) => {
                for (kind, entry) in entries {
                    if let Some(entry) = entry.into_link() {
                        links.insert(kind, entry.url);
                    }
                }
            }
            RawLinkedData::Other(_) => {}
        }
        links
    }
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawLinkedData::deserialize(deserializer).map(Links::from)
    }
}

/// Read the normalized `type → url` form back, as written to
/// `place-lookup.json`. Input records never take this path.
pub(crate) fn deserialize_normalized<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Links, D::Error> {
    IndexMap::<String, String>::deserialize(deserializer).map(Links)
}
