//! Property tests over randomly generated datasets.
//!
//! Each case joins a small random modern/ancient dataset with
//! `Atlas::from_records()` and checks the cross-artifact guarantees the
//! display layer relies on.

use proptest::prelude::*;

use bible_atlas::model::{AncientPlace, LonLat, ModernLocation};
use bible_atlas::Atlas;

const BOOKS: [&str; 5] = ["Gen", "Exod", "Matt", "1Kgs", "Rev"];

fn modern_strategy() -> impl Strategy<Value = Vec<ModernLocation>> {
    prop::collection::vec((-180.0f64..180.0, -90.0f64..90.0), 0..6).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lon, lat))| ModernLocation::new(format!("M{i}"), format!("modern {i}"), LonLat::new(lon, lat)))
            .collect()
    })
}

/// Candidates may point at ids beyond the modern set (`M0`..`M7`), so some
/// are dangling.
fn ancient_strategy() -> impl Strategy<Value = Vec<AncientPlace>> {
    let place = (
        prop::collection::vec((0usize..8, 0u8..4), 0..4),
        prop::collection::vec((0usize..BOOKS.len(), 1u8..50), 0..4),
        prop::collection::vec(prop::option::of(0u16..1000), 0..3),
    );
    prop::collection::vec(place, 0..10).prop_map(|places| {
        places
            .into_iter()
            .enumerate()
            .map(|(i, (candidates, verses, totals))| {
                let mut a = AncientPlace::new(format!("A{i}"), format!("ancient {i}"));
                for (m, score) in candidates {
                    a = a.with_candidate(format!("M{m}"), f64::from(score), format!("M{m}"));
                }
                for (b, chapter) in verses {
                    a = a.with_verse(format!("{}.{chapter}.1", BOOKS[b]), "ref");
                }
                for total in totals {
                    a = a.with_identification(total.map(f64::from));
                }
                a
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_resolution_follows_first_strict_maximum(
        modern in modern_strategy(),
        ancient in ancient_strategy(),
    ) {
        let atlas = Atlas::from_records(modern.clone(), ancient.clone());

        for (input, place) in ancient.iter().zip(atlas.places()) {
            let mut expected: Option<(&str, f64)> = None;
            for (id, c) in &input.modern_associations {
                if !modern.iter().any(|m| &m.id == id) {
                    continue;
                }
                let score = c.score.unwrap();
                if expected.is_none_or(|(_, top)| score > top) {
                    expected = Some((id.as_str(), score));
                }
            }

            match expected {
                Some((id, _)) => {
                    let m = modern.iter().find(|m| m.id == id).unwrap();
                    prop_assert_eq!(place.modern_id.as_deref(), Some(id));
                    prop_assert_eq!(place.lat, Some(m.coord.lat));
                    prop_assert_eq!(place.lon, Some(m.coord.lon));
                }
                None => {
                    prop_assert_eq!(place.modern_id.as_deref(), None);
                    prop_assert_eq!(place.lat, None);
                    prop_assert_eq!(place.lon, None);
                }
            }

            let totals: Vec<f64> = input.identifications.iter().filter_map(|i| i.total()).collect();
            let confidence = totals.iter().copied().fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))));
            prop_assert_eq!(place.confidence, confidence.unwrap_or(0.0));
        }
    }

    #[test]
    fn prop_indices_are_consistent(
        modern in modern_strategy(),
        ancient in ancient_strategy(),
    ) {
        let atlas = Atlas::from_records(modern, ancient);
        let idx = atlas.indices();

        // verse index: unique ids, each with a verse in that book
        for book in idx.verse_index.books() {
            let ids = idx.verse_index.get(book).unwrap();
            let mut seen = std::collections::HashSet::new();
            for id in ids {
                prop_assert!(seen.insert(*id));
                let place = idx.place_lookup[id];
                prop_assert!(place.verses.iter().any(|v| v.osis.split('.').next() == Some(book)));
            }
        }

        // modern → ancient ⊆ place lookup
        for (modern_id, ids) in &idx.modern_to_ancient {
            for id in ids {
                let place = idx.place_lookup.get(id);
                prop_assert!(place.is_some());
                prop_assert_eq!(place.unwrap().modern_id.as_deref(), Some(*modern_id));
            }
        }

        // every resolved place is listed under its modern id
        for (id, place) in &idx.place_lookup {
            if let Some(modern_id) = &place.modern_id {
                let listed = idx.modern_to_ancient.get(modern_id.as_str());
                prop_assert!(listed.is_some_and(|ids| ids.contains(id)));
            }
        }

        prop_assert_eq!(idx.light_markers.len(), atlas.markers().len());
    }
}
