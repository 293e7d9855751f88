//! Lookup indices over a joined atlas.
//!
//! All indices borrow from the marker and place slices they were built from,
//! and every mapping keeps first-seen order so repeated builds over the same
//! input serialize identically.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::model::{LightMarker, Marker, Place};

/// Book code → ids of places with at least one verse in that book.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VerseIndex<'p>(IndexMap<&'p str, IndexSet<&'p str>>);

impl<'p> VerseIndex<'p> {
    pub fn add(&mut self, place: &'p Place) {
        for verse in &place.verses {
            self.0.entry(verse.book()).or_default().insert(&place.id);
        }
    }

    pub fn get(&self, book: &str) -> Option<&IndexSet<&'p str>> {
        self.0.get(book)
    }

    pub fn books(&self) -> impl Iterator<Item = &'p str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Every index the display layer needs, built in one pass over the places.
#[derive(Debug, Clone, Serialize)]
pub struct Indices<'a> {
    pub verse_index: VerseIndex<'a>,
    /// Place id → place. A repeated id keeps the later place.
    pub place_lookup: IndexMap<&'a str, &'a Place>,
    /// Modern id → ids of places resolved to it, in place order.
    pub modern_to_ancient: IndexMap<&'a str, Vec<&'a str>>,
    pub light_markers: Vec<LightMarker<'a>>,
}

impl<'a> Indices<'a> {
    pub fn build(markers: &'a [Marker], places: &'a [Place]) -> Self {
        let mut verse_index = VerseIndex::default();
        let mut place_lookup = IndexMap::with_capacity(places.len());
        let mut modern_to_ancient: IndexMap<&str, Vec<&str>> = IndexMap::new();

        for place in places {
            verse_index.add(place);
            place_lookup.insert(place.id.as_str(), place);
            if let Some(modern_id) = &place.modern_id {
                modern_to_ancient.entry(modern_id.as_str()).or_default().push(&place.id);
            }
        }

        Self {
            verse_index,
            place_lookup,
            modern_to_ancient,
            light_markers: markers.iter().map(LightMarker::from).collect(),
        }
    }

    /// Places resolved to a modern location, looked up through the index.
    pub fn ancient_for(&self, modern_id: &str) -> Vec<&'a Place> {
        self.modern_to_ancient
            .get(modern_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.place_lookup.get(id).copied())
            .collect()
    }
}
