//! Read side of the artifacts, as the map uses them after startup.
//!
//! A [`Catalog`] is built from the three startup files only
//! (`markers.json`, `modern-to-ancient.json`, `place-lookup.json`); no other
//! artifact and no further join is needed to answer a marker selection.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::export::{MARKERS, MODERN_TO_ANCIENT, PLACE_LOOKUP};
use crate::model::{Marker, Place};
use crate::{Error, Result};

pub struct Catalog {
    markers: Vec<Marker>,
    modern_to_ancient: IndexMap<String, Vec<String>>,
    place_lookup: IndexMap<String, Place>,
}

impl Catalog {
    pub fn new(
        markers: Vec<Marker>,
        modern_to_ancient: IndexMap<String, Vec<String>>,
        place_lookup: IndexMap<String, Place>,
    ) -> Self {
        Self { markers, modern_to_ancient, place_lookup }
    }

    /// Load the startup artifacts from a build output directory.
    pub fn load(out_dir: &Path) -> Result<Self> {
        Ok(Self::new(
            read_json(&out_dir.join(MARKERS))?,
            read_json(&out_dir.join(MODERN_TO_ANCIENT))?,
            read_json(&out_dir.join(PLACE_LOOKUP))?,
        ))
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.place_lookup.get(id)
    }

    /// A marker together with the ancient places resolved to it.
    pub fn select(&self, marker_id: &str) -> Result<Selection<'_>> {
        let modern = self
            .marker(marker_id)
            .ok_or_else(|| Error::NotFound(format!("marker {marker_id}")))?;
        let ancient = self
            .modern_to_ancient
            .get(marker_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.place_lookup.get(id))
            .collect();
        Ok(Selection { modern, ancient })
    }

    /// Markers passing `filter`, in marker order.
    pub fn filter<'c>(&'c self, filter: &MarkerFilter) -> impl Iterator<Item = &'c Marker> {
        self.markers.iter().filter(move |m| filter.matches(m))
    }

    /// Distinct marker types, sorted.
    pub fn place_types(&self) -> Vec<&str> {
        self.markers
            .iter()
            .map(|m| m.kind.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection<'c> {
    pub modern: &'c Marker,
    pub ancient: Vec<&'c Place>,
}

/// Search text plus a type checklist. Both empty means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerFilter {
    query: String,
    types: Vec<String>,
}

impl MarkerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring search.
    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        self.query = query.as_ref().to_lowercase();
        self
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.types.push(kind.into());
        self
    }

    /// A marker matches when the query occurs in its name, one of its
    /// alternate names or the name of an associated ancient place, and its
    /// type is on the checklist (an empty checklist allows every type).
    pub fn matches(&self, marker: &Marker) -> bool {
        if !self.types.is_empty() && !self.types.iter().any(|t| *t == marker.kind) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&self.query);
        hit(marker.name.as_str())
            || marker.names.iter().any(|n| hit(n.as_str()))
            || marker
                .ancient_assoc
                .values()
                .filter_map(|a| a.name.as_deref())
                .any(hit)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::MalformedInput {
        path: path.to_path_buf(),
        line: source.line(),
        source,
    })
}
