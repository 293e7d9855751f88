//! The two join stages.
//!
//! ```text
//! Vec<ModernLocation> ──normalize_modern──▶ Vec<Marker> + ModernTable
//!                                                          │ (read-only)
//! &[AncientPlace] ─────resolve_places─────────────────────▶ Vec<ResolvedPlace>
//! ```
//!
//! Stage two never mutates the table, so places are resolved in parallel
//! and collected back in input order.

use std::sync::LazyLock;

use hashbrown::HashMap;
use rayon::prelude::*;
use regex::Regex;

use crate::model::*;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Remove HTML tags, keeping the text between them.
pub fn strip_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

// ============================================================================
// Stage 1: modern locations
// ============================================================================

/// Modern id → normalized record. Owns every modern record once stage one
/// finishes; everything downstream borrows.
#[derive(Debug, Default)]
pub struct ModernTable {
    records: HashMap<String, ModernLocation>,
}

impl ModernTable {
    pub fn get(&self, id: &str) -> Option<&ModernLocation> {
        self.records.get(id)
    }
}

/// Flatten each modern record into a [`Marker`] and move it into the table.
///
/// Every record yields a marker. When ids repeat, the table keeps the
/// record read last.
pub fn normalize_modern(records: Vec<ModernLocation>) -> (Vec<Marker>, ModernTable) {
    let mut markers = Vec::with_capacity(records.len());
    let mut table = ModernTable { records: HashMap::with_capacity(records.len()) };

    for record in records {
        markers.push(marker_for(&record));
        if let Some(previous) = table.records.insert(record.id.clone(), record) {
            tracing::debug!(id = %previous.id, "duplicate modern id, keeping later record");
        }
    }

    (markers, table)
}

fn marker_for(m: &ModernLocation) -> Marker {
    let thumbnail = m.thumbnail();
    Marker {
        id: m.id.clone(),
        name: m.label.clone(),
        kind: m.kind.clone(),
        lat: m.coord.lat,
        lon: m.coord.lon,
        geometry: m.geometry.clone(),
        thumbnail: m.thumbnail_file().map(str::to_owned),
        thumbnail_desc: thumbnail
            .and_then(|t| t.description.as_deref())
            .map(strip_tags)
            .unwrap_or_default(),
        thumbnail_credit: m.thumbnail_credit().to_owned(),
        ancient_assoc: m.ancient_associations.clone(),
        names: m.names.iter().map(|n| n.name.clone()).collect(),
        geojson_file: m.geojson_file.clone(),
        has_polygon: m.geometry.as_ref().is_some_and(GeometryKind::has_polygon),
    }
}

// ============================================================================
// Stage 2: ancient places
// ============================================================================

/// Outcome of scanning one place's association candidates.
#[derive(Debug, Clone, Copy)]
pub struct BestMatch<'a, 't> {
    pub candidate: Option<(&'a Candidate, &'t ModernLocation)>,
    /// Candidates whose modern id is not in the table.
    pub dangling: usize,
}

/// Pick the eligible candidate with the highest score.
///
/// A candidate is eligible when its modern id exists in `table` and it has
/// a score. Equal scores keep the first candidate in input order.
pub fn best_association<'a, 't>(place: &'a AncientPlace, table: &'t ModernTable) -> BestMatch<'a, 't> {
    let mut best: Option<(f64, &'a Candidate, &'t ModernLocation)> = None;
    let mut dangling = 0;

    for (modern_id, candidate) in &place.modern_associations {
        let Some(modern) = table.get(modern_id) else {
            dangling += 1;
            tracing::debug!(place = %place.id, modern = %modern_id, "skipping association to unknown modern id");
            continue;
        };
        let Some(score) = candidate.score else {
            continue;
        };
        // strict: ties keep the earlier candidate
        if best.is_none_or(|(top, _, _)| score > top) {
            best = Some((score, candidate, modern));
        }
    }

    BestMatch {
        candidate: best.map(|(_, candidate, modern)| (candidate, modern)),
        dangling,
    }
}

/// Highest identification total, or 0 when no identification has one.
pub fn confidence(identifications: &[Identification]) -> f64 {
    identifications
        .iter()
        .filter_map(Identification::total)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// A resolved place plus per-place bookkeeping for the build summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub place: Place,
    pub dangling: usize,
}

/// Resolve one ancient place against the finished modern table.
pub fn resolve_place(a: &AncientPlace, table: &ModernTable) -> ResolvedPlace {
    let best = best_association(a, table);
    let modern = best.candidate.map(|(_, modern)| modern);

    let place = Place {
        id: a.id.clone(),
        name: a.label.clone(),
        kind: a.kind.clone(),
        lat: modern.map(|m| m.coord.lat),
        lon: modern.map(|m| m.coord.lon),
        modern_name: best.candidate.and_then(|(c, _)| c.name.clone()),
        modern_id: modern.map(|m| m.id.clone()),
        verses: a
            .verses
            .iter()
            .map(|v| PlaceVerse { reference: v.readable.clone(), osis: v.osis.clone() })
            .collect(),
        confidence: confidence(&a.identifications),
        translation_names: a.translation_name_counts.clone(),
        links: a.linked_data.clone(),
        thumbnail: modern.and_then(ModernLocation::thumbnail_file).map(str::to_owned),
        thumbnail_credit: modern.map(ModernLocation::thumbnail_credit).unwrap_or_default().to_owned(),
        geojson_file: a.geojson_file.clone(),
    };

    ResolvedPlace { place, dangling: best.dangling }
}

/// Resolve every place. Output order matches `ancient`.
pub fn resolve_places(ancient: &[AncientPlace], table: &ModernTable) -> Vec<ResolvedPlace> {
    ancient.par_iter().map(|a| resolve_place(a, table)).collect()
}
