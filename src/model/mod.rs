//! # Atlas Data Model
//!
//! Input records as they appear in the line-delimited datasets, and the
//! artifact DTOs written for the display layer.
//!
//! Design rule: pure data. No I/O, no state. Normalization that only
//! depends on a single field (coordinate strings, linked-data shapes)
//! happens inside `Deserialize`, so downstream code only ever sees the
//! canonical form.

pub mod coord;
pub mod links;
pub mod modern;
pub mod ancient;
pub mod artifact;

pub use coord::{LonLat, CoordError};
pub use links::Links;
pub use modern::{ModernLocation, GeometryKind, Media, Thumbnail, AltName, AncientAssociation};
pub use ancient::{AncientPlace, VerseRef, Candidate, Identification, IdentificationScore};
pub use artifact::{Marker, Place, PlaceVerse, LightMarker};

use serde::{Deserialize, Deserializer};

/// Book code of an OSIS reference: everything before the first `.`.
///
/// `"Matt.1.1"` → `"Matt"`; a code without a separator is its own book.
pub fn book_code(osis: &str) -> &str {
    osis.split_once('.').map_or(osis, |(book, _)| book)
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
